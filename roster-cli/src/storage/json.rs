use super::atomic::{read_optional, write_atomically};
use async_trait::async_trait;
use roster_domain::error::DomainResult as Result;
use roster_domain::model::{Player, Team};
use roster_domain::persist::{Snapshot, SnapshotSerializer};
use std::path::{Path, PathBuf};

/// JSON 快照：球队与球员各一个文件，顶层为格式化输出的数组
#[derive(Debug, Clone)]
pub struct JsonSnapshotSerializer {
    teams_path: PathBuf,
    players_path: PathBuf,
}

impl JsonSnapshotSerializer {
    pub fn new(teams_path: impl Into<PathBuf>, players_path: impl Into<PathBuf>) -> Self {
        Self {
            teams_path: teams_path.into(),
            players_path: players_path.into(),
        }
    }

    pub fn teams_path(&self) -> &Path {
        &self.teams_path
    }

    pub fn players_path(&self) -> &Path {
        &self.players_path
    }

    pub async fn load_teams(&self) -> Result<Vec<Team>> {
        let Some(text) = read_optional(&self.teams_path).await? else {
            return Ok(Vec::new());
        };
        let teams: Vec<Team> = serde_json::from_str(&text)?;
        // 反序列化绕过了构造校验，这里补上
        for team in &teams {
            team.validate()?;
        }
        Ok(teams)
    }

    pub async fn load_players(&self) -> Result<Vec<Player>> {
        let Some(text) = read_optional(&self.players_path).await? else {
            return Ok(Vec::new());
        };
        let players: Vec<Player> = serde_json::from_str(&text)?;
        for player in &players {
            player.validate()?;
        }
        Ok(players)
    }
}

#[async_trait]
impl SnapshotSerializer for JsonSnapshotSerializer {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let teams = serde_json::to_vec_pretty(snapshot.teams())?;
        let players = serde_json::to_vec_pretty(snapshot.players())?;

        write_atomically(&self.teams_path, &teams).await?;
        write_atomically(&self.players_path, &players).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Snapshot> {
        let teams = self.load_teams().await?;
        let players = self.load_players().await?;
        Ok(Snapshot::new(teams, players))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::model::TeamId;

    #[tokio::test]
    async fn writes_camel_case_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let serializer =
            JsonSnapshotSerializer::new(dir.path().join("teams.json"), dir.path().join("players.json"));
        let team = Team::new("Sporting", "Lisbon", "Amorim", "3-4-3").unwrap();
        let player = Player::new(team.id(), "Coates", 1990, "Defender", 4).unwrap();

        serializer
            .save(&Snapshot::new(vec![team.clone()], vec![player.clone()]))
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(serializer.teams_path()).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["teamId"], team.id().to_string());
        assert_eq!(raw[0]["matchesWon"], 0);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(serializer.players_path()).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["playerId"], player.id().to_string());
        assert_eq!(raw[0]["squadNumber"], 4);
    }

    #[tokio::test]
    async fn invalid_entity_in_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let serializer =
            JsonSnapshotSerializer::new(dir.path().join("teams.json"), dir.path().join("players.json"));
        let doc = serde_json::json!([{
            "playerId": TeamId::new().to_string(),
            "teamId": TeamId::new().to_string(),
            "fullName": "X",
            "birthYear": 1990,
            "fieldLocation": "Keeper",
            "squadNumber": 1,
            "goals": 0
        }]);
        std::fs::write(serializer.players_path(), doc.to_string()).unwrap();

        // 名字少于两个字符
        assert!(serializer.load().await.is_err());
    }

    #[tokio::test]
    async fn loads_hand_written_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let serializer =
            JsonSnapshotSerializer::new(dir.path().join("teams.json"), dir.path().join("players.json"));
        let team_id = TeamId::new();
        std::fs::write(
            serializer.teams_path(),
            format!(
                r#"[{{"teamId":"{team_id}","name":"Porto","city":"Porto","coach":"Farioli","formation":"4-3-3","matchesWon":2}}]"#
            ),
        )
        .unwrap();
        std::fs::write(serializer.players_path(), "[]").unwrap();

        let snapshot = serializer.load().await.unwrap();
        assert_eq!(snapshot.teams().len(), 1);
        assert_eq!(snapshot.teams()[0].id(), team_id);
        assert_eq!(snapshot.teams()[0].name(), "Porto");
        assert_eq!(snapshot.teams()[0].matches_won(), 2);
        assert!(snapshot.players().is_empty());
    }

    #[tokio::test]
    async fn wrapped_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let serializer =
            JsonSnapshotSerializer::new(dir.path().join("teams.json"), dir.path().join("players.json"));
        std::fs::write(serializer.teams_path(), r#"{"teams":[]}"#).unwrap();
        assert!(serializer.load_teams().await.is_err());
    }

    #[tokio::test]
    async fn missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let serializer =
            JsonSnapshotSerializer::new(dir.path().join("teams.json"), dir.path().join("players.json"));
        assert!(serializer.load().await.unwrap().is_empty());
    }
}
