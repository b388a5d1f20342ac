//! 事件子系统（eventing）
//!
//! 把领域状态的变更与其副作用（界面反馈、落盘）解耦：
//! - `EventListener`：对某一事件类型作出反应的处理单元；
//! - `EventBus`：按事件类型精确路由的发布/订阅协议；
//! - `InMemoryEventBus`：进程内实现，异步、相互独立地投递给各监听器。
//!
pub mod bus;
pub mod bus_inmemory;
pub mod listener;

pub use bus::EventBus;
pub use bus_inmemory::{EventBusConfig, InMemoryEventBus};
pub use listener::EventListener;
