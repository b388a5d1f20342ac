//! 领域实体（Team、Player）与其标识
//!
//! 字段校验在构造时完成；实体一经创建即满足约束，
//! 仅 `Team::record_win` 与 `Player::score_goal` 会在生命周期内修改状态。

mod ids;
mod player;
mod team;

pub use ids::{PlayerId, TeamId};
pub use player::{GOALS_MAX, Player, SQUAD_NUMBER_MAX};
pub use team::Team;

use crate::error::{DomainError, DomainResult};

/// 去除首尾空白并校验长度（按字符计）
fn validate_text(field: &str, value: &str, min: usize, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be blank")));
    }
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}
