//! 运行配置
//!
//! 来源按优先级从低到高：内置默认值、TOML 文件（默认 `roster.toml`）、
//! `ROSTER__*` 环境变量（`__` 分隔层级）、命令行参数。
//!
use clap::Parser;
use config::{Config, ConfigError, Environment, File, FileFormat};
use roster_domain::persist::parse_debounce_ms;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// 命令行参数
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "roster", version, about = "Football team roster manager")]
pub struct Cli {
    /// 配置文件路径；显式指定时文件必须存在
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 去抖间隔（毫秒），覆盖配置文件
    #[arg(long, value_name = "VALUE")]
    pub debounce_ms: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub persistence: PersistenceConfig,
    pub data: DataPaths,
    pub eventing: EventingConfig,
    pub logging: LoggingConfig,
}

/// 保持原始字符串，非法值在使用处回退到默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub debounce_ms: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub teams_csv: PathBuf,
    pub players_csv: PathBuf,
    pub teams_json: PathBuf,
    pub players_json: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            teams_csv: PathBuf::from("data/teams.csv"),
            players_csv: PathBuf::from("data/players.csv"),
            teams_json: PathBuf::from("data/teams.json"),
            players_json: PathBuf::from("data/players.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventingConfig {
    pub shutdown_timeout_ms: u64,
}

impl Default for EventingConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 快照文件格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistenceFormat {
    #[default]
    Dual,
    Json,
    Csv,
}

impl PersistenceFormat {
    /// 未配置或无法识别时回退到 `Dual`
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "dual" => Self::Dual,
            "json" => Self::Json,
            "csv" => Self::Csv,
            other => {
                tracing::warn!(format = other, "unknown persistence format, using dual");
                Self::default()
            }
        }
    }
}

impl fmt::Display for PersistenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dual => "dual",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

impl RosterConfig {
    /// 读取配置文件与环境变量，再叠加命令行参数
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let (path, required) = match &cli.config {
            Some(path) => (path.as_path(), true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        let env = Environment::with_prefix("ROSTER")
            .prefix_separator("__")
            .separator("__");
        let mut config = Self::from_sources(path, required, env)?;
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(raw) = &cli.debounce_ms {
            self.persistence.debounce_ms = Some(raw.clone());
        }
    }

    fn from_sources(path: &Path, required: bool, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn debounce_interval(&self) -> Duration {
        parse_debounce_ms(self.persistence.debounce_ms.as_deref())
    }

    pub fn format(&self) -> PersistenceFormat {
        PersistenceFormat::parse(self.persistence.format.as_deref())
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.eventing.shutdown_timeout_ms)
    }
}
