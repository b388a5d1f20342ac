//! 名册命令行宿主（roster-cli）
//!
//! - `config`：命令行、配置文件与环境变量；
//! - `storage`：CSV / JSON / 双格式快照序列化器；
//! - `console`：菜单与交互控制器；
//! - `ui_listener`：把领域事件转成用户提示；
//! - `app`：启动加载、装配订阅与有序关闭。
//!
pub mod app;
pub mod config;
pub mod console;
pub mod storage;
pub mod ui_listener;

pub use app::RosterApp;
pub use config::{Cli, PersistenceFormat, RosterConfig};
