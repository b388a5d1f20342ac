//! 持久化（persist）
//!
//! 定义核心所消费的外部协作者契约与去抖快照写入：
//! - 仓储协议（`TeamRepository`/`PlayerRepository`），读取为时点拷贝；
//! - 快照（`Snapshot`）与序列化器协议（`SnapshotSerializer`）；
//! - 去抖持久化监听器（`DebouncedPersistenceListener`），订阅全部变更事件并合并写盘。
//!
//! 具体存储与文件格式由上层提供实现并注入。
//!
#[cfg(feature = "eventing")]
mod debounced_listener;
mod repository;
mod serializer;
mod snapshot;

#[cfg(feature = "eventing")]
pub use debounced_listener::{DEFAULT_DEBOUNCE, DebouncedPersistenceListener, parse_debounce_ms};
pub use repository::{PlayerRepository, TeamRepository};
pub use serializer::SnapshotSerializer;
pub use snapshot::Snapshot;
