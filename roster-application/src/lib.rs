//! 名册应用层（roster-application）
//!
//! - `InMemoryRosterRepository`：进程内仓储，读取返回拷贝；
//! - `TeamService` / `PlayerService`：用例编排，写仓储后发布领域事件；
//! - `MatchSimulator`：比赛中球员进球的判定策略。
//!
pub mod error;
pub mod inmemory_repository;
pub mod match_simulator;
pub mod player_service;
pub mod team_service;

pub use error::{AppError, AppResult};
pub use inmemory_repository::InMemoryRosterRepository;
pub use match_simulator::{MatchSimulator, RandomMatchSimulator};
pub use player_service::{NewPlayer, PlayerService};
pub use team_service::{MatchOutcome, RosterSummary, TeamService, TeamSummaryRow};
