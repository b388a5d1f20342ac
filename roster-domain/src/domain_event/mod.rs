//! 领域事件（Domain Event）
//!
//! 事件是已完成变更的不可变记录：只携带标识与变更的最小事实，
//! 在发布时按值拷贝，不引用可变实体。
//!
//! 事件集合是封闭的（`DomainEvent` 枚举），消费端可以穷尽匹配；
//! `EventKind` 是各变体在编译期已知的类型标记，事件总线以它为键路由。

mod event_kind;
mod events;

pub use event_kind::EventKind;
pub use events::{DomainEvent, MatchSimulated, PlayerAdded, PlayerDeleted, TeamCreated, TeamDeleted};
