use crate::error::{AppError, AppResult};
use bon::Builder;
use roster_domain::domain_event::{PlayerAdded, PlayerDeleted};
use roster_domain::eventing::EventBus;
use roster_domain::model::{Player, PlayerId, TeamId};
use roster_domain::persist::{PlayerRepository, TeamRepository};
use std::sync::Arc;

/// 新增球员的输入
#[derive(Debug, Clone, Builder)]
pub struct NewPlayer {
    pub team_id: TeamId,
    #[builder(into)]
    pub full_name: String,
    pub birth_year: i32,
    #[builder(into)]
    pub field_location: String,
    pub squad_number: u8,
}

#[derive(Builder)]
pub struct PlayerService {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl PlayerService {
    /// 球队必须存在，且号码在队内唯一
    pub async fn add_player(&self, new: NewPlayer) -> AppResult<Player> {
        let team = self
            .teams
            .find_team(&new.team_id)
            .await?
            .ok_or(AppError::TeamNotFound(new.team_id))?;

        let player = Player::new(
            new.team_id,
            &new.full_name,
            new.birth_year,
            &new.field_location,
            new.squad_number,
        )?;

        let taken = self
            .players
            .find_players_by_team(&new.team_id)
            .await?
            .iter()
            .any(|p| p.squad_number() == player.squad_number());
        if taken {
            return Err(AppError::SquadNumberTaken {
                team: team.name().to_string(),
                squad_number: player.squad_number(),
            });
        }

        self.players.save_player(player.clone()).await?;

        tracing::debug!(player_id = %player.id(), team_id = %team.id(), "player added");
        self.event_bus.publish(
            PlayerAdded {
                team_id: player.team_id(),
                player_id: player.id(),
                squad_number: player.squad_number(),
            }
            .into(),
        );
        Ok(player)
    }

    pub async fn delete_player(&self, player_id: &PlayerId) -> AppResult<Player> {
        let removed = self
            .players
            .delete_player(player_id)
            .await?
            .ok_or(AppError::PlayerNotFound(*player_id))?;

        self.publish_deleted(&removed);
        Ok(removed)
    }

    /// 删除某队全部球员，返回删除数量；每名球员各发布一次 PlayerDeleted
    pub async fn delete_players_by_team(&self, team_id: &TeamId) -> AppResult<usize> {
        let mut removed = 0;
        for player in self.players.find_players_by_team(team_id).await? {
            if let Some(p) = self.players.delete_player(&player.id()).await? {
                self.publish_deleted(&p);
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub async fn find_player(&self, player_id: &PlayerId) -> AppResult<Player> {
        self.players
            .find_player(player_id)
            .await?
            .ok_or(AppError::PlayerNotFound(*player_id))
    }

    /// 球队不存在时报 TeamNotFound，而非返回空列表
    pub async fn find_players_by_team(&self, team_id: &TeamId) -> AppResult<Vec<Player>> {
        if self.teams.find_team(team_id).await?.is_none() {
            return Err(AppError::TeamNotFound(*team_id));
        }
        Ok(self.players.find_players_by_team(team_id).await?)
    }

    fn publish_deleted(&self, player: &Player) {
        tracing::debug!(player_id = %player.id(), "player deleted");
        self.event_bus.publish(
            PlayerDeleted {
                team_id: player.team_id(),
                player_id: player.id(),
            }
            .into(),
        );
    }
}
