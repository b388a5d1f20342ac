use super::{PlayerId, TeamId, validate_text};
use crate::error::{DomainError, DomainResult as Result};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 60;
const BIRTH_YEAR_MIN: i32 = 1900;
pub const SQUAD_NUMBER_MAX: u8 = 100;
pub const GOALS_MAX: u32 = 999;

/// 球员实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "playerId")]
    id: PlayerId,
    team_id: TeamId,
    full_name: String,
    birth_year: i32,
    field_location: String,
    squad_number: u8,
    goals: u32,
}

impl Player {
    /// 创建新球员（生成新标识，进球数为 0）
    pub fn new(
        team_id: TeamId,
        full_name: &str,
        birth_year: i32,
        field_location: &str,
        squad_number: u8,
    ) -> Result<Self> {
        Self::restore(
            PlayerId::new(),
            team_id,
            full_name,
            birth_year,
            field_location,
            squad_number,
            0,
        )
    }

    /// 以已有标识与状态重建球员（用于从快照加载）
    pub fn restore(
        id: PlayerId,
        team_id: TeamId,
        full_name: &str,
        birth_year: i32,
        field_location: &str,
        squad_number: u8,
        goals: u32,
    ) -> Result<Self> {
        let current_year = Utc::now().year();
        if !(BIRTH_YEAR_MIN..=current_year).contains(&birth_year) {
            return Err(DomainError::validation(format!(
                "birth year {birth_year} outside {BIRTH_YEAR_MIN}..={current_year}"
            )));
        }
        if squad_number > SQUAD_NUMBER_MAX {
            return Err(DomainError::InvalidSquadNumber {
                reason: format!("{squad_number} outside 0..={SQUAD_NUMBER_MAX}"),
            });
        }
        check_goals(goals)?;

        Ok(Self {
            id,
            team_id,
            full_name: validate_text("full name", full_name, NAME_MIN, NAME_MAX)?,
            birth_year,
            field_location: validate_text("position", field_location, 1, usize::MAX)?,
            squad_number,
            goals,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn field_location(&self) -> &str {
        &self.field_location
    }

    pub fn squad_number(&self) -> u8 {
        self.squad_number
    }

    pub fn goals(&self) -> u32 {
        self.goals
    }

    /// 进球数加一，超过上限时报错且不修改状态
    pub fn score_goal(&mut self) -> Result<()> {
        let goals = self.goals + 1;
        check_goals(goals)?;
        self.goals = goals;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        Self::restore(
            self.id,
            self.team_id,
            &self.full_name,
            self.birth_year,
            &self.field_location,
            self.squad_number,
            self.goals,
        )
        .map(|_| ())
    }

    pub fn summary(&self) -> String {
        format!(
            "Player:\n- team id: {}\n- player id: {}\n- full name: {}\n- birth year: {}\n- position: {}\n- squad number: {}\n- goals: {}",
            self.team_id,
            self.id,
            self.full_name,
            self.birth_year,
            self.field_location,
            self.squad_number,
            self.goals
        )
    }
}

fn check_goals(goals: u32) -> Result<()> {
    if goals > GOALS_MAX {
        return Err(DomainError::validation(format!(
            "goals {goals} outside 0..={GOALS_MAX}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(squad: u8) -> Result<Player> {
        Player::new(TeamId::new(), "Santi Cazorla", 1984, "Midfielder", squad)
    }

    #[test]
    fn squad_number_range() {
        assert!(player(0).is_ok());
        assert!(player(100).is_ok());
        assert!(matches!(
            player(101),
            Err(DomainError::InvalidSquadNumber { .. })
        ));
    }

    #[test]
    fn birth_year_range() {
        let team = TeamId::new();
        assert!(Player::new(team, "Old Timer", 1899, "GK", 1).is_err());
        let next_year = Utc::now().year() + 1;
        assert!(Player::new(team, "Not Born", next_year, "GK", 1).is_err());
        assert!(Player::new(team, "Just Born", Utc::now().year(), "GK", 1).is_ok());
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        let team = TeamId::new();
        let p = Player::new(team, "  Iker  ", 1981, " GK ", 1).unwrap();
        assert_eq!(p.full_name(), "Iker");
        assert_eq!(p.field_location(), "GK");
        assert!(Player::new(team, "I", 1981, "GK", 1).is_err());
        assert!(Player::new(team, "Iker", 1981, "  ", 1).is_err());
    }

    #[test]
    fn score_goal_stops_at_cap() {
        let mut p = Player::restore(
            PlayerId::new(),
            TeamId::new(),
            "Pichichi",
            1990,
            "Forward",
            9,
            GOALS_MAX - 1,
        )
        .unwrap();
        p.score_goal().unwrap();
        assert_eq!(p.goals(), GOALS_MAX);
        assert!(p.score_goal().is_err());
        assert_eq!(p.goals(), GOALS_MAX);
    }
}
