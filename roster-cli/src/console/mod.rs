//! 交互式控制台
//!
//! 编号菜单驱动名册用例；输入源与输出目标是泛型，测试中可替换为内存缓冲。
//! 进程的标准输入在独立线程上读取（`spawn_line_reader`），退出时不会卡住运行时。
//!
mod controller;
mod input;
mod menu;

pub use controller::{ConsoleController, ConsoleError};
pub use input::{LineSource, ThreadLines, spawn_line_reader};
pub use menu::{MenuOption, render as render_menu};
