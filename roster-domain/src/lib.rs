//! 球队名册领域层（roster-domain）
//!
//! 提供名册管理所需的领域构件：
//! - 实体（`model`）：球队、球员及其标识与字段校验；
//! - 领域事件（`domain_event`）：封闭的变更事件集合与类型标记；
//! - 事件系统（`eventing`）：按类型路由、异步投递的事件总线；
//! - 持久化（`persist`）：仓储与序列化器契约、快照，以及去抖写盘监听器。
//!
//! 典型用法：
//! 1. 服务层修改仓储后发布 `DomainEvent`；
//! 2. 事件总线把事件异步分发给订阅了该类型的全部监听器；
//! 3. `DebouncedPersistenceListener` 在安静期后读取完整快照并交给序列化器；
//! 4. 进程退出前宿主调用 `flush_now`，再依次关闭监听器与总线。
//!
pub mod domain_event;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod model;
pub mod persist;
