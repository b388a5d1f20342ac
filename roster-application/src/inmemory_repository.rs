use async_trait::async_trait;
use roster_domain::error::DomainResult as Result;
use roster_domain::model::{Player, PlayerId, Team, TeamId};
use roster_domain::persist::{PlayerRepository, TeamRepository};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 基于内存的名册仓储
/// - 球队与球员各自一把读写锁，读取返回拷贝
/// - 需要同时持有两把锁时，一律先锁球队再锁球员
/// - 列表顺序：球队按名称，球员按所属球队再按号码
#[derive(Default)]
pub struct InMemoryRosterRepository {
    teams: RwLock<HashMap<TeamId, Team>>,
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn teams(&self) -> RwLockReadGuard<'_, HashMap<TeamId, Team>> {
        self.teams.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn teams_mut(&self) -> RwLockWriteGuard<'_, HashMap<TeamId, Team>> {
        self.teams.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn players(&self) -> RwLockReadGuard<'_, HashMap<PlayerId, Player>> {
        self.players.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn players_mut(&self) -> RwLockWriteGuard<'_, HashMap<PlayerId, Player>> {
        self.players.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sort_players(players: &mut [Player]) {
    players.sort_by(|a, b| {
        a.team_id()
            .cmp(&b.team_id())
            .then(a.squad_number().cmp(&b.squad_number()))
            .then(a.id().cmp(&b.id()))
    });
}

#[async_trait]
impl TeamRepository for InMemoryRosterRepository {
    async fn save_team(&self, team: Team) -> Result<()> {
        self.teams_mut().insert(team.id(), team);
        Ok(())
    }

    async fn save_teams(&self, teams: Vec<Team>) -> Result<()> {
        let mut guard = self.teams_mut();
        for team in teams {
            guard.insert(team.id(), team);
        }
        Ok(())
    }

    async fn find_team(&self, team_id: &TeamId) -> Result<Option<Team>> {
        Ok(self.teams().get(team_id).cloned())
    }

    async fn delete_team(&self, team_id: &TeamId) -> Result<Option<Team>> {
        let mut teams = self.teams_mut();
        let Some(removed) = teams.remove(team_id) else {
            return Ok(None);
        };
        self.players_mut().retain(|_, p| p.team_id() != *team_id);
        Ok(Some(removed))
    }

    async fn find_all_teams(&self) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self.teams().values().cloned().collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(teams)
    }
}

#[async_trait]
impl PlayerRepository for InMemoryRosterRepository {
    async fn save_player(&self, player: Player) -> Result<()> {
        self.players_mut().insert(player.id(), player);
        Ok(())
    }

    async fn save_players(&self, players: Vec<Player>) -> Result<()> {
        let mut guard = self.players_mut();
        for player in players {
            guard.insert(player.id(), player);
        }
        Ok(())
    }

    async fn find_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.players().get(player_id).cloned())
    }

    async fn delete_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.players_mut().remove(player_id))
    }

    async fn find_all_players(&self) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = self.players().values().cloned().collect();
        sort_players(&mut players);
        Ok(players)
    }

    async fn find_players_by_team(&self, team_id: &TeamId) -> Result<Vec<Player>> {
        let mut players: Vec<Player> = self
            .players()
            .values()
            .filter(|p| p.team_id() == *team_id)
            .cloned()
            .collect();
        sort_players(&mut players);
        Ok(players)
    }
}
