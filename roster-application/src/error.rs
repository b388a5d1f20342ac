use roster_domain::error::DomainError;
use roster_domain::model::{PlayerId, TeamId};

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("squad number {squad_number} already taken in team {team}")]
    SquadNumberTaken { team: String, squad_number: u8 },
}

pub type AppResult<T> = Result<T, AppError>;
