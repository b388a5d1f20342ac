use serde::{Deserialize, Serialize};
use std::fmt;

/// 事件类型标记：与 `DomainEvent` 的变体一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    TeamCreated,
    TeamDeleted,
    PlayerAdded,
    PlayerDeleted,
    MatchSimulated,
}

impl EventKind {
    /// 全部事件类型；订阅仍需逐个调用 `subscribe`
    pub const ALL: [EventKind; 5] = [
        EventKind::TeamCreated,
        EventKind::TeamDeleted,
        EventKind::PlayerAdded,
        EventKind::PlayerDeleted,
        EventKind::MatchSimulated,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::TeamCreated => "TeamCreated",
            EventKind::TeamDeleted => "TeamDeleted",
            EventKind::PlayerAdded => "PlayerAdded",
            EventKind::PlayerDeleted => "PlayerDeleted",
            EventKind::MatchSimulated => "MatchSimulated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
