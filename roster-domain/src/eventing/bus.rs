//! 事件总线（EventBus）协议
//!
//! 定义按事件类型精确路由的发布/订阅抽象：
//! - `subscribe`：为单个事件类型注册监听器，不存在“订阅全部”的原语；
//! - `publish`：即发即弃，不等待任何监听器；
//! - `shutdown`：停止接收新投递，尽力等待已派发的投递完成。
//!
use super::EventListener;
use crate::domain_event::{DomainEvent, EventKind};
use crate::error::DomainResult as Result;
use async_trait::async_trait;
use std::sync::Arc;

/// 事件总线：负责分发事件与管理订阅
#[async_trait]
pub trait EventBus: Send + Sync {
    /// 为 `kind` 注册监听器；同一监听器关心多个类型时需逐个注册
    fn subscribe(&self, kind: EventKind, listener: Arc<dyn EventListener>) -> Result<()>;

    /// 发布事件；无订阅者时静默忽略
    fn publish(&self, event: DomainEvent);

    /// 关闭总线
    async fn shutdown(&self);
}

#[async_trait]
impl<T> EventBus for Arc<T>
where
    T: EventBus + ?Sized,
{
    fn subscribe(&self, kind: EventKind, listener: Arc<dyn EventListener>) -> Result<()> {
        (**self).subscribe(kind, listener)
    }

    fn publish(&self, event: DomainEvent) {
        (**self).publish(event)
    }

    async fn shutdown(&self) {
        (**self).shutdown().await
    }
}
