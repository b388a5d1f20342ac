use super::input::LineSource;
use super::menu::{self, MenuOption};
use roster_application::{AppError, NewPlayer, PlayerService, TeamService};
use roster_domain::model::{PlayerId, TeamId};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("input closed")]
    InputClosed,
    #[error("invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
    #[error(transparent)]
    App(#[from] AppError),
    #[error("console io: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, ConsoleError>;

/// 交互式菜单：读一行选项，执行对应用例，打印结果
/// - 空白、非数字或未知选项重新提示
/// - 用例失败只打印错误，循环继续
/// - 选择 0 或输入结束时返回
pub struct ConsoleController<L, W> {
    input: L,
    output: W,
    teams: Arc<TeamService>,
    players: Arc<PlayerService>,
}

impl<L, W> ConsoleController<L, W>
where
    L: LineSource,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: L, output: W, teams: Arc<TeamService>, players: Arc<PlayerService>) -> Self {
        Self {
            input,
            output,
            teams,
            players,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.say(&menu::render()).await?;
            let Some(line) = self.prompt("Choose an option").await? else {
                return Ok(());
            };
            let Some(option) = MenuOption::parse(&line) else {
                self.say("Unknown option, try again.\n").await?;
                continue;
            };
            if option == MenuOption::Exit {
                self.say("Bye.\n").await?;
                return Ok(());
            }

            match self.handle(option).await {
                Ok(()) => {}
                Err(ConsoleError::InputClosed) => return Ok(()),
                Err(ConsoleError::Io(err)) => return Err(ConsoleError::Io(err)),
                Err(err) => {
                    tracing::debug!(option = option.label(), error = %err, "action failed");
                    self.say(&format!("Error: {err}\n")).await?;
                }
            }
        }
    }

    async fn handle(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::CreateTeam => self.create_team().await,
            MenuOption::AddPlayer => self.add_player().await,
            MenuOption::PlayerInfo => {
                let id: PlayerId = self.ask_parsed("Player id", "player id").await?;
                let player = self.players.find_player(&id).await?;
                self.say(&format!("{}\n", player.summary())).await
            }
            MenuOption::TeamPlayers => {
                let id = self.ask_team("Team id").await?;
                let players = self.players.find_players_by_team(&id).await?;
                if players.is_empty() {
                    return self.say("No players registered.\n").await;
                }
                for p in players {
                    self.say(&format!(
                        "#{} {} ({}) [{}] goals: {}\n",
                        p.squad_number(),
                        p.full_name(),
                        p.field_location(),
                        p.id(),
                        p.goals()
                    ))
                    .await?;
                }
                Ok(())
            }
            MenuOption::TeamInfo => {
                let id = self.ask_team("Team id").await?;
                let team = self.teams.find_team(&id).await?;
                self.say(&format!("{}\n", team.summary())).await
            }
            MenuOption::DeletePlayer => {
                let id: PlayerId = self.ask_parsed("Player id", "player id").await?;
                let removed = self.players.delete_player(&id).await?;
                self.say(&format!("Deleted player {}.\n", removed.full_name())).await
            }
            MenuOption::DeleteTeam => {
                let id = self.ask_team("Team id").await?;
                let removed = self.teams.delete_team(&id).await?;
                self.say(&format!("Deleted team {} and its players.\n", removed.name()))
                    .await
            }
            MenuOption::Summary => self.summary().await,
            MenuOption::SimulateMatch => {
                let a = self.ask_team("Home team id").await?;
                let b = self.ask_parsed("Away team id", "team id").await?;
                let outcome = self.teams.simulate_match(&a, &b).await?;
                self.say(&format!("{outcome}\n")).await
            }
            MenuOption::Exit => Ok(()),
        }
    }

    async fn create_team(&mut self) -> Result<()> {
        let name = self.ask("Name").await?;
        let city = self.ask("City").await?;
        let coach = self.ask("Coach").await?;
        let formation = self.ask("Formation").await?;
        let team = self.teams.create_team(&name, &city, &coach, &formation).await?;
        self.say(&format!("Created team {} [{}].\n", team.name(), team.id()))
            .await
    }

    async fn add_player(&mut self) -> Result<()> {
        let team_id = self.ask_team("Team id").await?;
        let full_name = self.ask("Full name").await?;
        let birth_year: i32 = self.ask_parsed("Birth year", "birth year").await?;
        let field_location = self.ask("Position").await?;
        let squad_number: u8 = self.ask_parsed("Squad number", "squad number").await?;

        let player = self
            .players
            .add_player(
                NewPlayer::builder()
                    .team_id(team_id)
                    .full_name(full_name)
                    .birth_year(birth_year)
                    .field_location(field_location)
                    .squad_number(squad_number)
                    .build(),
            )
            .await?;
        self.say(&format!("Added player {} [{}].\n", player.full_name(), player.id()))
            .await
    }

    async fn summary(&mut self) -> Result<()> {
        let summary = self.teams.summary().await?;
        let mut text = format!(
            "Teams: {}  Players: {}\n",
            summary.total_teams, summary.total_players
        );
        for row in &summary.rows {
            text.push_str(&format!(
                "- {} [{}]: {} players, {} wins\n",
                row.name, row.team_id, row.players, row.matches_won
            ));
        }
        self.say(&text).await
    }

    /// 先列出现有球队再读取标识
    async fn ask_team(&mut self, label: &str) -> Result<TeamId> {
        let teams = self.teams.find_all_teams().await?;
        let mut listing = String::new();
        for t in &teams {
            listing.push_str(&format!("  {} [{}]\n", t.name(), t.id()));
        }
        if !listing.is_empty() {
            self.say(&listing).await?;
        }
        self.ask_parsed(label, "team id").await
    }

    async fn ask_parsed<T: FromStr>(&mut self, label: &str, field: &'static str) -> Result<T> {
        let raw = self.ask(label).await?;
        raw.trim()
            .parse()
            .map_err(|_| ConsoleError::InvalidInput { field, value: raw })
    }

    async fn ask(&mut self, label: &str) -> Result<String> {
        self.prompt(label).await?.ok_or(ConsoleError::InputClosed)
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.say(&format!("{label}: ")).await?;
        Ok(self.input.next_line().await?)
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
