//! 去抖持久化监听器（DebouncedPersistenceListener）
//!
//! 把高频的变更事件折叠为限速的快照写入：
//! - 每个事件（不区分类型）都会重置同一个计时器，计时从本次到达重新开始（滑动窗口）；
//! - 任一时刻最多只有一个待触发的计时器，重新布置时原子地替换而不是叠加；
//! - 计时器在安静期结束后触发：读取仓储快照并交给序列化器；
//! - `flush_now` 取消待触发的计时器并立即写入，供宿主在退出前调用。
//!
//! 只在尾沿触发：事件持续以小于间隔的频率到达时，写入会被无限推迟，没有周期性强制刷新。
//! 写入失败只记录日志，不重试；下一个事件自然开启新一轮去抖。

use super::{PlayerRepository, Snapshot, SnapshotSerializer, TeamRepository};
use crate::domain_event::DomainEvent;
use crate::error::{DomainError, DomainResult as Result};
use crate::eventing::EventListener;
use async_trait::async_trait;
use bon::bon;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// 未配置或配置无效时使用的去抖间隔
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// 解析以毫秒表示的去抖间隔
///
/// 缺省、无法解析或为 0 时回退到 [`DEFAULT_DEBOUNCE`]，不会导致启动失败。
///
/// ```
/// use roster_domain::persist::{DEFAULT_DEBOUNCE, parse_debounce_ms};
/// use std::time::Duration;
///
/// assert_eq!(parse_debounce_ms(Some("500")), Duration::from_millis(500));
/// assert_eq!(parse_debounce_ms(Some("soon")), DEFAULT_DEBOUNCE);
/// assert_eq!(parse_debounce_ms(None), DEFAULT_DEBOUNCE);
/// ```
pub fn parse_debounce_ms(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return DEFAULT_DEBOUNCE;
    };

    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => {
            tracing::warn!(
                value = raw,
                default_ms = DEFAULT_DEBOUNCE.as_millis() as u64,
                "invalid debounce interval, using default"
            );
            DEFAULT_DEBOUNCE
        }
    }
}

struct PendingTrigger {
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Default)]
struct TriggerState {
    generation: u64,
    pending: Option<PendingTrigger>,
    closed: bool,
}

struct Shared {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    serializer: Arc<dyn SnapshotSerializer>,
    interval: Duration,
    trigger: Mutex<TriggerState>,
    // 串行化写入：定时触发与 flush_now 不会同时写盘
    flush_gate: tokio::sync::Mutex<()>,
}

/// 去抖持久化监听器
pub struct DebouncedPersistenceListener {
    shared: Arc<Shared>,
}

#[bon]
impl DebouncedPersistenceListener {
    #[builder]
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        players: Arc<dyn PlayerRepository>,
        serializer: Arc<dyn SnapshotSerializer>,
        #[builder(default = DEFAULT_DEBOUNCE)] debounce_interval: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                teams,
                players,
                serializer,
                interval: debounce_interval,
                trigger: Mutex::new(TriggerState::default()),
                flush_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }
}

impl DebouncedPersistenceListener {
    pub fn debounce_interval(&self) -> Duration {
        self.shared.interval
    }

    /// 是否存在待触发的计时器
    pub fn is_armed(&self) -> bool {
        self.shared.lock_trigger().pending.is_some()
    }

    /// 布置（或重新布置）计时器：取消尚未触发的旧计时器，从现在起重新计时
    pub fn schedule(&self) -> Result<()> {
        let runtime = Handle::try_current()
            .map_err(|e| DomainError::scheduling(format!("no async runtime: {e}")))?;

        let mut state = self.shared.lock_trigger();
        if state.closed {
            return Err(DomainError::scheduling("persistence listener is shut down"));
        }

        if let Some(previous) = state.pending.take() {
            previous.cancel.cancel();
        }
        state.generation += 1;
        let generation = state.generation;
        let cancel = CancellationToken::new();
        state.pending = Some(PendingTrigger {
            generation,
            cancel: cancel.clone(),
        });
        drop(state);

        let shared = self.shared.clone();
        let interval = shared.interval;
        runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(interval) => shared.fire(generation).await,
            }
        });
        Ok(())
    }

    /// 取消待触发的计时器并立即写入快照，等待写入完成
    ///
    /// 与新事件并发安全：写入期间到达的事件会布置新的计时器，在本次写入之后再次写盘。
    pub async fn flush_now(&self) -> Result<()> {
        if let Some(pending) = self.shared.lock_trigger().pending.take() {
            pending.cancel.cancel();
        }
        self.shared.persist().await
    }

    /// 停止接收新的布置请求
    ///
    /// 不会自动写盘：仍待触发的计时器被取消，需要最终写入时宿主应先调用 `flush_now`。
    /// 返回前等待进行中的写入结束；返回值表示是否丢弃了待触发的写入。
    pub async fn shutdown(&self) -> bool {
        let discarded = {
            let mut state = self.shared.lock_trigger();
            state.closed = true;
            state.pending.take()
        };

        let discarded = match discarded {
            Some(pending) => {
                pending.cancel.cancel();
                tracing::warn!("pending snapshot discarded at shutdown");
                true
            }
            None => false,
        };

        let _idle = self.shared.flush_gate.lock().await;
        tracing::debug!("persistence listener shut down");
        discarded
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.lock_trigger().closed
    }
}

impl Shared {
    fn lock_trigger(&self) -> MutexGuard<'_, TriggerState> {
        self.trigger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fire(&self, generation: u64) {
        {
            let mut state = self.lock_trigger();
            // 仅最近一次布置的计时器可以触发；已被替换的计时器即使醒来也直接放弃
            if state.pending.as_ref().map(|p| p.generation) != Some(generation) {
                return;
            }
            state.pending = None;
        }

        // 失败已在 persist 中记录，等待下一个事件重新触发
        let _ = self.persist().await;
    }

    async fn persist(&self) -> Result<()> {
        let _gate = self.flush_gate.lock().await;

        let outcome = async {
            let teams = self.teams.find_all_teams().await?;
            let players = self.players.find_all_players().await?;
            let snapshot = Snapshot::new(teams, players);
            self.serializer.save(&snapshot).await?;
            Ok::<_, DomainError>(snapshot)
        }
        .await;

        match outcome {
            Ok(snapshot) => {
                tracing::debug!(
                    teams = snapshot.teams().len(),
                    players = snapshot.players().len(),
                    "snapshot saved"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save snapshot");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl EventListener for DebouncedPersistenceListener {
    fn listener_name(&self) -> &str {
        "debounced-persistence"
    }

    async fn on_event(&self, event: &DomainEvent) -> anyhow::Result<()> {
        if self.is_shut_down() {
            tracing::debug!(event = %event.kind(), "persistence listener closed, event ignored");
            return Ok(());
        }
        if let Err(err) = self.schedule() {
            // 变更已经生效，调度失败只记录
            tracing::warn!(event = %event.kind(), error = %err, "failed to schedule snapshot");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_debounce_rejects_zero_and_negative() {
        assert_eq!(parse_debounce_ms(Some("0")), DEFAULT_DEBOUNCE);
        assert_eq!(parse_debounce_ms(Some("-5")), DEFAULT_DEBOUNCE);
        assert_eq!(parse_debounce_ms(Some(" 120 ")), Duration::from_millis(120));
    }
}
