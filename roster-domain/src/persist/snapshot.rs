use crate::model::{Player, Team};
use chrono::{DateTime, Utc};

/// 快照：某一时刻全部球队与全部球员的拷贝
///
/// 两个集合各自一致地读取，但并非跨集合的单一事务：
/// 新建球队与引用它的球员可能分落在相邻两次快照中。
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    teams: Vec<Team>,
    players: Vec<Player>,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self {
            teams,
            players,
            taken_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn taken_at(&self) -> &DateTime<Utc> {
        &self.taken_at
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.players.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Team>, Vec<Player>) {
        (self.teams, self.players)
    }
}
