//! 内存版事件总线（InMemoryEventBus）
//!
//! 每个订阅（事件类型 + 监听器）拥有独立的无界队列与投递任务：
//! - `publish` 仅把事件按发布顺序压入各订阅队列，从不等待监听器；
//! - 同一监听器对同一事件类型的投递保持 FIFO，不同类型之间不保证顺序；
//! - 慢监听器只会拖慢自己的队列，不影响其他监听器；
//! - 监听器返回错误或 panic 只影响本次投递，记录日志后继续处理后续事件。
//!
//! 注册表以 `EventKind` 为键，路由时无需任何运行时类型转换。

use super::{EventBus, EventListener};
use crate::domain_event::{DomainEvent, EventKind};
use crate::error::{DomainError, DomainResult as Result};
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 事件总线配置
#[derive(Clone, Copy, Debug)]
pub struct EventBusConfig {
    /// `shutdown` 等待已派发投递完成的上限
    pub shutdown_timeout: Duration,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

struct Subscription {
    listener_name: String,
    tx: mpsc::UnboundedSender<Arc<DomainEvent>>,
}

/// 简单的内存事件总线实现
pub struct InMemoryEventBus {
    registry: DashMap<EventKind, Vec<Subscription>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    closed: AtomicBool,
    config: EventBusConfig,
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new(EventBusConfig::default())
    }
}

impl InMemoryEventBus {
    pub fn new(config: EventBusConfig) -> Self {
        Self {
            registry: DashMap::new(),
            workers: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            config,
        }
    }

    /// 某事件类型当前的订阅数量
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry.get(&kind).map(|subs| subs.len()).unwrap_or(0)
    }

    pub fn is_shut_down(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    fn subscribe(&self, kind: EventKind, listener: Arc<dyn EventListener>) -> Result<()> {
        let runtime = Handle::try_current()
            .map_err(|e| DomainError::event_bus(format!("no async runtime: {e}")))?;

        // 持有该类型的分片写锁完成检查与登记，与 shutdown 的清空互斥
        let mut subs = self.registry.entry(kind).or_default();
        if self.closed.load(Ordering::SeqCst) {
            return Err(DomainError::event_bus("event bus is shut down"));
        }

        let listener_name = listener.listener_name().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = runtime.spawn(deliver_loop(kind, listener, rx));
        self.workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(worker);
        subs.push(Subscription {
            listener_name: listener_name.clone(),
            tx,
        });

        tracing::debug!(listener = %listener_name, event = %kind, "listener subscribed");
        Ok(())
    }

    fn publish(&self, event: DomainEvent) {
        let kind = event.kind();
        if self.closed.load(Ordering::SeqCst) {
            tracing::warn!(event = %kind, "event bus is shut down, event dropped");
            return;
        }

        let Some(subs) = self.registry.get(&kind) else {
            tracing::trace!(event = %kind, "no listeners registered");
            return;
        };

        let event = Arc::new(event);
        for sub in subs.iter() {
            if sub.tx.send(event.clone()).is_err() {
                tracing::warn!(
                    listener = %sub.listener_name,
                    event = %kind,
                    "listener worker stopped, event dropped"
                );
            }
        }
    }

    async fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        // 丢弃发送端：各投递任务处理完队列中剩余事件后自然退出
        self.registry.clear();
        let workers = std::mem::take(&mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner));
        let pending = workers.len();

        let drain = futures_util::future::join_all(workers);
        match tokio::time::timeout(self.config.shutdown_timeout, drain).await {
            Ok(results) => {
                for err in results.into_iter().filter_map(|r| r.err()) {
                    tracing::warn!(error = %err, "listener worker ended abnormally");
                }
                tracing::debug!(workers = pending, "event bus drained");
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.shutdown_timeout.as_millis() as u64,
                    "event bus shutdown timed out, in-flight deliveries abandoned"
                );
            }
        }
    }
}

async fn deliver_loop(
    kind: EventKind,
    listener: Arc<dyn EventListener>,
    mut rx: mpsc::UnboundedReceiver<Arc<DomainEvent>>,
) {
    while let Some(event) = rx.recv().await {
        let outcome = AssertUnwindSafe(listener.on_event(&event))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(
                    listener = listener.listener_name(),
                    event = %kind,
                    error = %err,
                    "listener failed to handle event"
                );
            }
            Err(panic) => {
                tracing::error!(
                    listener = listener.listener_name(),
                    event = %kind,
                    panic = panic_message(panic.as_ref()),
                    "listener panicked while handling event"
                );
            }
        }
    }

    tracing::trace!(listener = listener.listener_name(), event = %kind, "listener worker stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
