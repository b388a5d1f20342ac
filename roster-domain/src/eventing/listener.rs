//! 事件监听器（EventListener）
//!
//! 对某一类型事件作出反应的处理单元，由事件总线异步调用。
//!
use crate::domain_event::DomainEvent;
use async_trait::async_trait;

/// 事件监听器：处理订阅类型的事件
///
/// 返回的错误只影响本次投递：总线记录日志后丢弃，不重试，也不会传回发布方。
#[async_trait]
pub trait EventListener: Send + Sync {
    /// 监听器名称（用于日志与失败定位）
    fn listener_name(&self) -> &str;

    /// 处理事件
    async fn on_event(&self, event: &DomainEvent) -> anyhow::Result<()>;
}
