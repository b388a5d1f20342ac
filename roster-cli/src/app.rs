//! 进程生命周期：加载快照 → 装配订阅 → 运行控制台 → 刷盘并关闭
//!
use crate::config::{PersistenceFormat, RosterConfig};
use crate::console::{ConsoleController, ConsoleError, LineSource};
use crate::storage::{CsvSnapshotSerializer, DualFormatSerializer, JsonSnapshotSerializer};
use crate::ui_listener::UiEventListener;
use roster_application::{InMemoryRosterRepository, PlayerService, TeamService};
use roster_domain::domain_event::EventKind;
use roster_domain::eventing::{EventBus, EventBusConfig, InMemoryEventBus};
use roster_domain::persist::{
    DebouncedPersistenceListener, PlayerRepository, SnapshotSerializer, TeamRepository,
};
use std::sync::Arc;
use tokio::io::AsyncWrite;

/// 按配置的格式构造快照序列化器
pub fn build_serializer(config: &RosterConfig) -> Arc<dyn SnapshotSerializer> {
    let paths = &config.data;
    let json = JsonSnapshotSerializer::new(&paths.teams_json, &paths.players_json);
    let csv = CsvSnapshotSerializer::new(&paths.teams_csv, &paths.players_csv);
    match config.format() {
        PersistenceFormat::Dual => Arc::new(DualFormatSerializer::new(json, csv)),
        PersistenceFormat::Json => Arc::new(json),
        PersistenceFormat::Csv => Arc::new(csv),
    }
}

/// 把上次保存的快照装入仓储；失败时记录警告并以空名册启动
pub async fn load_snapshot(serializer: &dyn SnapshotSerializer, repository: &InMemoryRosterRepository) {
    let snapshot = match serializer.load().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(error = %err, "could not load snapshot, starting empty");
            return;
        }
    };

    let (teams, players) = snapshot.into_parts();
    let (team_count, player_count) = (teams.len(), players.len());
    if let Err(err) = repository.save_teams(teams).await {
        tracing::warn!(error = %err, "could not restore teams");
    }
    if let Err(err) = repository.save_players(players).await {
        tracing::warn!(error = %err, "could not restore players");
    }
    tracing::info!(teams = team_count, players = player_count, "snapshot loaded");
}

pub struct RosterApp {
    repository: Arc<InMemoryRosterRepository>,
    event_bus: Arc<InMemoryEventBus>,
    persistence: Arc<DebouncedPersistenceListener>,
    teams: Arc<TeamService>,
    players: Arc<PlayerService>,
}

impl RosterApp {
    /// 必须在 tokio 运行时内调用（订阅会为每个监听器启动投递任务）
    pub async fn bootstrap(config: &RosterConfig) -> anyhow::Result<Self> {
        let serializer = build_serializer(config);
        let repository = Arc::new(InMemoryRosterRepository::new());
        load_snapshot(serializer.as_ref(), &repository).await;

        let event_bus = Arc::new(InMemoryEventBus::new(EventBusConfig {
            shutdown_timeout: config.shutdown_timeout(),
        }));

        let debounce_interval = config.debounce_interval();
        let persistence = Arc::new(
            DebouncedPersistenceListener::builder()
                .teams(repository.clone())
                .players(repository.clone())
                .serializer(serializer)
                .debounce_interval(debounce_interval)
                .build(),
        );
        let ui = Arc::new(UiEventListener::new(repository.clone()));

        for kind in EventKind::ALL {
            event_bus.subscribe(kind, ui.clone())?;
            event_bus.subscribe(kind, persistence.clone())?;
        }
        tracing::info!(
            debounce_ms = debounce_interval.as_millis() as u64,
            format = %config.format(),
            "roster ready"
        );

        let teams = Arc::new(
            TeamService::builder()
                .teams(repository.clone())
                .players(repository.clone())
                .event_bus(event_bus.clone())
                .build(),
        );
        let players = Arc::new(
            PlayerService::builder()
                .teams(repository.clone())
                .players(repository.clone())
                .event_bus(event_bus.clone())
                .build(),
        );

        Ok(Self {
            repository,
            event_bus,
            persistence,
            teams,
            players,
        })
    }

    pub fn repository(&self) -> &Arc<InMemoryRosterRepository> {
        &self.repository
    }

    pub fn teams(&self) -> &Arc<TeamService> {
        &self.teams
    }

    pub fn players(&self) -> &Arc<PlayerService> {
        &self.players
    }

    pub async fn run_console<L, W>(&self, input: L, output: W) -> Result<(), ConsoleError>
    where
        L: LineSource,
        W: AsyncWrite + Unpin,
    {
        ConsoleController::new(input, output, self.teams.clone(), self.players.clone())
            .run()
            .await
    }

    /// 写出最终快照，排空总线后再关闭持久化监听器
    pub async fn shutdown(&self) {
        self.stop().await;
        tracing::info!("roster stopped");
    }

    /// 返回监听器关闭时是否丢弃了待触发的写入
    async fn stop(&self) -> bool {
        if let Err(err) = self.persistence.flush_now().await {
            tracing::error!(error = %err, "final snapshot failed");
        }
        self.event_bus.shutdown().await;
        // 排空期间投递的事件可能重新挂起写入
        if self.persistence.is_armed() {
            if let Err(err) = self.persistence.flush_now().await {
                tracing::error!(error = %err, "final snapshot failed");
            }
        }
        self.persistence.shutdown().await
    }
}
