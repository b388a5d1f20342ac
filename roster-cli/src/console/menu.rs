/// 主菜单选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CreateTeam,
    AddPlayer,
    PlayerInfo,
    TeamPlayers,
    TeamInfo,
    DeletePlayer,
    DeleteTeam,
    Summary,
    SimulateMatch,
    Exit,
}

impl MenuOption {
    /// 按菜单展示顺序
    pub const ALL: [MenuOption; 10] = [
        MenuOption::CreateTeam,
        MenuOption::AddPlayer,
        MenuOption::PlayerInfo,
        MenuOption::TeamPlayers,
        MenuOption::TeamInfo,
        MenuOption::DeletePlayer,
        MenuOption::DeleteTeam,
        MenuOption::Summary,
        MenuOption::SimulateMatch,
        MenuOption::Exit,
    ];

    pub fn key(self) -> u8 {
        match self {
            MenuOption::CreateTeam => 1,
            MenuOption::AddPlayer => 2,
            MenuOption::PlayerInfo => 3,
            MenuOption::TeamPlayers => 4,
            MenuOption::TeamInfo => 5,
            MenuOption::DeletePlayer => 6,
            MenuOption::DeleteTeam => 7,
            MenuOption::Summary => 8,
            MenuOption::SimulateMatch => 9,
            MenuOption::Exit => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::CreateTeam => "Create team",
            MenuOption::AddPlayer => "Add player to team",
            MenuOption::PlayerInfo => "Show player",
            MenuOption::TeamPlayers => "List team players",
            MenuOption::TeamInfo => "Show team",
            MenuOption::DeletePlayer => "Delete player",
            MenuOption::DeleteTeam => "Delete team",
            MenuOption::Summary => "Roster summary",
            MenuOption::SimulateMatch => "Simulate match",
            MenuOption::Exit => "Exit",
        }
    }

    /// 空白、非数字或未知编号返回 None
    pub fn parse(input: &str) -> Option<Self> {
        let key: u8 = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|o| o.key() == key)
    }
}

pub fn render() -> String {
    let mut menu = String::from("\n=== Roster ===\n");
    for option in MenuOption::ALL {
        menu.push_str(&format!("{}. {}\n", option.key(), option.label()));
    }
    menu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys_only() {
        assert_eq!(MenuOption::parse(" 1 "), Some(MenuOption::CreateTeam));
        assert_eq!(MenuOption::parse("9"), Some(MenuOption::SimulateMatch));
        assert_eq!(MenuOption::parse("0"), Some(MenuOption::Exit));
        assert_eq!(MenuOption::parse(""), None);
        assert_eq!(MenuOption::parse("abc"), None);
        assert_eq!(MenuOption::parse("10"), None);
        assert_eq!(MenuOption::parse("-1"), None);
    }

    #[test]
    fn render_lists_exit_last() {
        let menu = render();
        assert!(menu.starts_with("\n=== Roster ===\n1. Create team\n"));
        assert!(menu.ends_with("0. Exit\n"));
    }
}
