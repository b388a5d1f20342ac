use super::EventKind;
use crate::model::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// 球队已创建
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCreated {
    pub team_id: TeamId,
    pub name: String,
    pub city: String,
    pub coach: String,
    pub formation: String,
}

/// 球队已删除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDeleted {
    pub team_id: TeamId,
    pub name: String,
}

/// 球员已加入球队
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAdded {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub squad_number: u8,
}

/// 球员已从球队移除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDeleted {
    pub team_id: TeamId,
    pub player_id: PlayerId,
}

/// 比赛模拟已完成
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSimulated {
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    pub goals_a: u32,
    pub goals_b: u32,
}

/// 领域事件（封闭集合）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DomainEvent {
    TeamCreated(TeamCreated),
    TeamDeleted(TeamDeleted),
    PlayerAdded(PlayerAdded),
    PlayerDeleted(PlayerDeleted),
    MatchSimulated(MatchSimulated),
}

impl DomainEvent {
    /// 事件的运行时类型标记
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::TeamCreated(_) => EventKind::TeamCreated,
            DomainEvent::TeamDeleted(_) => EventKind::TeamDeleted,
            DomainEvent::PlayerAdded(_) => EventKind::PlayerAdded,
            DomainEvent::PlayerDeleted(_) => EventKind::PlayerDeleted,
            DomainEvent::MatchSimulated(_) => EventKind::MatchSimulated,
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for DomainEvent {
                fn from(payload: $variant) -> Self {
                    DomainEvent::$variant(payload)
                }
            }
        )+
    };
}

impl_from_payload!(TeamCreated, TeamDeleted, PlayerAdded, PlayerDeleted, MatchSimulated);
