//! 球队用例：创建、删除、查询、比赛模拟与名册概览
//!
//! 每个成功的写操作先落到仓储，再发布对应的领域事件。
//! 发布是非阻塞的，监听器的执行结果不会影响用例的返回值。
//!
use crate::error::{AppError, AppResult};
use crate::match_simulator::{MatchSimulator, default_simulator};
use bon::Builder;
use roster_domain::domain_event::{MatchSimulated, TeamCreated, TeamDeleted};
use roster_domain::eventing::EventBus;
use roster_domain::model::{Team, TeamId};
use roster_domain::persist::{PlayerRepository, TeamRepository};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[derive(Builder)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    event_bus: Arc<dyn EventBus>,
    #[builder(default = default_simulator())]
    simulator: Arc<dyn MatchSimulator>,
}

/// 一场模拟比赛的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub team_a: Team,
    pub team_b: Team,
    pub goals_a: u32,
    pub goals_b: u32,
}

impl MatchOutcome {
    /// 胜者标识；平局为 None
    pub fn winner(&self) -> Option<TeamId> {
        match self.goals_a.cmp(&self.goals_b) {
            Ordering::Greater => Some(self.team_a.id()),
            Ordering::Less => Some(self.team_b.id()),
            Ordering::Equal => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.goals_a == self.goals_b
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.goals_a.cmp(&self.goals_b) {
            Ordering::Greater => format!("{} wins", self.team_a.name()),
            Ordering::Less => format!("{} wins", self.team_b.name()),
            Ordering::Equal => "draw".to_string(),
        };
        write!(
            f,
            "{} {} x {} {} ({verdict})",
            self.team_a.name(),
            self.goals_a,
            self.goals_b,
            self.team_b.name()
        )
    }
}

/// 名册概览中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummaryRow {
    pub team_id: TeamId,
    pub name: String,
    pub matches_won: u32,
    pub players: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub total_teams: usize,
    pub total_players: usize,
    pub rows: Vec<TeamSummaryRow>,
}

impl TeamService {
    pub async fn create_team(
        &self,
        name: &str,
        city: &str,
        coach: &str,
        formation: &str,
    ) -> AppResult<Team> {
        let team = Team::new(name, city, coach, formation)?;
        self.teams.save_team(team.clone()).await?;

        tracing::debug!(team_id = %team.id(), name = team.name(), "team created");
        self.event_bus.publish(
            TeamCreated {
                team_id: team.id(),
                name: team.name().to_string(),
                city: team.city().to_string(),
                coach: team.coach().to_string(),
                formation: team.formation().to_string(),
            }
            .into(),
        );
        Ok(team)
    }

    /// 删除球队并级联删除其球员
    pub async fn delete_team(&self, team_id: &TeamId) -> AppResult<Team> {
        let removed = self
            .teams
            .delete_team(team_id)
            .await?
            .ok_or(AppError::TeamNotFound(*team_id))?;

        tracing::debug!(team_id = %removed.id(), "team deleted");
        self.event_bus.publish(
            TeamDeleted {
                team_id: removed.id(),
                name: removed.name().to_string(),
            }
            .into(),
        );
        Ok(removed)
    }

    pub async fn find_team(&self, team_id: &TeamId) -> AppResult<Team> {
        self.teams
            .find_team(team_id)
            .await?
            .ok_or(AppError::TeamNotFound(*team_id))
    }

    pub async fn find_all_teams(&self) -> AppResult<Vec<Team>> {
        Ok(self.teams.find_all_teams().await?)
    }

    pub async fn simulate_match(&self, team_a: &TeamId, team_b: &TeamId) -> AppResult<MatchOutcome> {
        if team_a == team_b {
            return Err(AppError::Validation(
                "a team cannot play against itself".to_string(),
            ));
        }
        let a = self.find_team(team_a).await?;
        let b = self.find_team(team_b).await?;

        let goals_a = self.play_side(team_a).await?;
        let goals_b = self.play_side(team_b).await?;

        let mut outcome = MatchOutcome {
            team_a: a,
            team_b: b,
            goals_a,
            goals_b,
        };
        match goals_a.cmp(&goals_b) {
            Ordering::Greater => {
                outcome.team_a.record_win();
                self.teams.save_team(outcome.team_a.clone()).await?;
            }
            Ordering::Less => {
                outcome.team_b.record_win();
                self.teams.save_team(outcome.team_b.clone()).await?;
            }
            Ordering::Equal => {}
        }

        tracing::debug!(%outcome, "match simulated");
        self.event_bus.publish(
            MatchSimulated {
                team_a_id: *team_a,
                team_b_id: *team_b,
                goals_a,
                goals_b,
            }
            .into(),
        );
        Ok(outcome)
    }

    /// 一方的进球数；进球球员的累计进球随之保存
    async fn play_side(&self, team_id: &TeamId) -> AppResult<u32> {
        let mut goals = 0;
        let mut scorers = Vec::new();
        for mut player in self.players.find_players_by_team(team_id).await? {
            if !self.simulator.scores(&player) {
                continue;
            }
            goals += 1;
            match player.score_goal() {
                Ok(()) => scorers.push(player),
                Err(err) => {
                    tracing::warn!(player_id = %player.id(), error = %err, "goal tally not updated");
                }
            }
        }
        self.players.save_players(scorers).await?;
        Ok(goals)
    }

    pub async fn summary(&self) -> AppResult<RosterSummary> {
        let teams = self.teams.find_all_teams().await?;
        let players = self.players.find_all_players().await?;

        let rows: Vec<TeamSummaryRow> = teams
            .iter()
            .map(|t| TeamSummaryRow {
                team_id: t.id(),
                name: t.name().to_string(),
                matches_won: t.matches_won(),
                players: players.iter().filter(|p| p.team_id() == t.id()).count(),
            })
            .collect();

        Ok(RosterSummary {
            total_teams: teams.len(),
            total_players: players.len(),
            rows,
        })
    }
}
