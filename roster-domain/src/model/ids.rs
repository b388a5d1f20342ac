//! 实体标识（Entity Id）
//!
//! 球队与球员均以随机生成的 UUID 作为身份标识，使用新类型区分，
//! 避免把球员 ID 误传为球队 ID。
//!
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// 生成新的随机标识
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }
    };
}

entity_id!(
    /// 球队标识
    ///
    /// ```
    /// use roster_domain::model::TeamId;
    ///
    /// let id = TeamId::new();
    /// let parsed: TeamId = id.to_string().parse().unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    TeamId
);

entity_id!(
    /// 球员标识
    PlayerId
);
