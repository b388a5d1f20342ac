//! 仓储协议
//!
//! 球队与球员的键值存储能力契约。读取接口必须返回调用时刻的独立拷贝
//! （copy-on-read），以便在并发写入时安全地生成快照。
//!
use crate::error::DomainResult as Result;
use crate::model::{Player, PlayerId, Team, TeamId};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// 保存球队；同标识已存在时覆盖
    async fn save_team(&self, team: Team) -> Result<()>;

    async fn save_teams(&self, teams: Vec<Team>) -> Result<()> {
        for team in teams {
            self.save_team(team).await?;
        }
        Ok(())
    }

    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>>;

    /// 删除球队及其名下球员，返回被删除的球队
    async fn delete_team(&self, team_id: &TeamId) -> Result<Option<Team>>;

    /// 全部球队的时点拷贝
    async fn find_all_teams(&self) -> Result<Vec<Team>>;
}

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn save_player(&self, player: Player) -> Result<()>;

    async fn save_players(&self, players: Vec<Player>) -> Result<()> {
        for player in players {
            self.save_player(player).await?;
        }
        Ok(())
    }

    async fn find_player(&self, player_id: &PlayerId) -> Result<Option<Player>>;

    async fn delete_player(&self, player_id: &PlayerId) -> Result<Option<Player>>;

    /// 全部球员的时点拷贝
    async fn find_all_players(&self) -> Result<Vec<Player>>;

    async fn find_players_by_team(&self, team_id: &TeamId) -> Result<Vec<Player>>;
}

#[async_trait]
impl<T> TeamRepository for Arc<T>
where
    T: TeamRepository + ?Sized,
{
    async fn save_team(&self, team: Team) -> Result<()> {
        (**self).save_team(team).await
    }

    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>> {
        (**self).find_team(team_id).await
    }

    async fn delete_team(&self, team_id: &TeamId) -> Result<Option<Team>> {
        (**self).delete_team(team_id).await
    }

    async fn find_all_teams(&self) -> Result<Vec<Team>> {
        (**self).find_all_teams().await
    }
}

#[async_trait]
impl<T> PlayerRepository for Arc<T>
where
    T: PlayerRepository + ?Sized,
{
    async fn save_player(&self, player: Player) -> Result<()> {
        (**self).save_player(player).await
    }

    async fn find_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        (**self).find_player(player_id).await
    }

    async fn delete_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        (**self).delete_player(player_id).await
    }

    async fn find_all_players(&self) -> Result<Vec<Player>> {
        (**self).find_all_players().await
    }

    async fn find_players_by_team(&self, team_id: &TeamId) -> Result<Vec<Player>> {
        (**self).find_players_by_team(team_id).await
    }
}
