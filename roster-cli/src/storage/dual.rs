use super::{CsvSnapshotSerializer, JsonSnapshotSerializer};
use async_trait::async_trait;
use roster_domain::error::DomainResult as Result;
use roster_domain::persist::{Snapshot, SnapshotSerializer};

/// 同时维护 JSON 与 CSV 两份快照
/// - 保存：先 JSON 后 CSV，任一失败即返回错误
/// - 加载：按集合优先取 JSON，JSON 缺失、为空或无法读取时回退到 CSV
#[derive(Debug, Clone)]
pub struct DualFormatSerializer {
    json: JsonSnapshotSerializer,
    csv: CsvSnapshotSerializer,
}

impl DualFormatSerializer {
    pub fn new(json: JsonSnapshotSerializer, csv: CsvSnapshotSerializer) -> Self {
        Self { json, csv }
    }
}

#[async_trait]
impl SnapshotSerializer for DualFormatSerializer {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.json.save(snapshot).await?;
        self.csv.save(snapshot).await
    }

    async fn load(&self) -> Result<Snapshot> {
        let teams = match self.json.load_teams().await {
            Ok(teams) if !teams.is_empty() => teams,
            Ok(_) => self.csv.load_teams().await?,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.json.teams_path().display(), "json teams unreadable, falling back to csv");
                self.csv.load_teams().await?
            }
        };
        let players = match self.json.load_players().await {
            Ok(players) if !players.is_empty() => players,
            Ok(_) => self.csv.load_players().await?,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.json.players_path().display(), "json players unreadable, falling back to csv");
                self.csv.load_players().await?
            }
        };
        Ok(Snapshot::new(teams, players))
    }
}
