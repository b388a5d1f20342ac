//! 分号分隔的 CSV 快照
//!
//! - 球队行：`id;name;city;coach;formation;matches_won`
//! - 球员行：`player_id;team_id;full_name;birth_year;position;squad;goals`
//!
//! 含 `;`、`"` 或换行的值整体加引号，内部引号加倍。无表头；
//! 空行与字段不足的行在加载时跳过。
//!
use super::atomic::{read_optional, write_atomically};
use async_trait::async_trait;
use roster_domain::error::DomainResult as Result;
use roster_domain::model::{Player, PlayerId, Team, TeamId};
use roster_domain::persist::{Snapshot, SnapshotSerializer};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const TEAM_FIELDS: usize = 6;
const PLAYER_FIELDS: usize = 7;

#[derive(Debug, Clone)]
pub struct CsvSnapshotSerializer {
    teams_path: PathBuf,
    players_path: PathBuf,
}

impl CsvSnapshotSerializer {
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
        rows(&text, TEAM_FIELDS).map(|f| decode_team(&f)).collect()
    }

    pub async fn load_players(&self) -> Result<Vec<Player>> {
        let Some(text) = read_optional(&self.players_path).await? else {
            return Ok(Vec::new());
        };
        rows(&text, PLAYER_FIELDS)
            .map(|f| decode_player(&f))
            .collect()
    }
}

#[async_trait]
impl SnapshotSerializer for CsvSnapshotSerializer {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let teams: String = snapshot.teams().iter().map(encode_team).collect();
        let players: String = snapshot.players().iter().map(encode_player).collect();

        write_atomically(&self.teams_path, teams.as_bytes()).await?;
        write_atomically(&self.players_path, players.as_bytes()).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Snapshot> {
        let teams = self.load_teams().await?;
        let players = self.load_players().await?;
        Ok(Snapshot::new(teams, players))
    }
}

pub fn encode_team(team: &Team) -> String {
    format!(
        "{};{};{};{};{};{}\n",
        team.id(),
        escape_field(team.name()),
        escape_field(team.city()),
        escape_field(team.coach()),
        escape_field(team.formation()),
        team.matches_won()
    )
}

pub fn encode_player(player: &Player) -> String {
    format!(
        "{};{};{};{};{};{};{}\n",
        player.id(),
        player.team_id(),
        escape_field(player.full_name()),
        player.birth_year(),
        escape_field(player.field_location()),
        player.squad_number(),
        player.goals()
    )
}

fn decode_team(fields: &[String]) -> Result<Team> {
    Team::restore(
        fields[0].parse::<TeamId>()?,
        &fields[1],
        &fields[2],
        &fields[3],
        &fields[4],
        fields[5].trim().parse()?,
    )
}

fn decode_player(fields: &[String]) -> Result<Player> {
    Player::restore(
        fields[0].parse::<PlayerId>()?,
        fields[1].parse::<TeamId>()?,
        &fields[2],
        fields[3].trim().parse()?,
        &fields[4],
        fields[5].trim().parse()?,
        fields[6].trim().parse()?,
    )
}

pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([';', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// 有效记录：跳过空行与字段数不足的行
fn rows(text: &str, min_fields: usize) -> impl Iterator<Item = Vec<String>> {
    parse_records(text).into_iter().filter(move |fields| {
        let blank = fields.iter().all(|f| f.trim().is_empty());
        if !blank && fields.len() < min_fields {
            tracing::debug!(fields = fields.len(), expected = min_fields, "short csv row skipped");
        }
        !blank && fields.len() >= min_fields
    })
}

/// 按引号规则切分记录；引号内的分隔符与换行属于值本身
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if current.is_empty() => quoted = true,
            ';' if !quoted => fields.push(std::mem::take(&mut current)),
            '\r' if !quoted => {}
            '\n' if !quoted => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(fields);
    }
    records
}
