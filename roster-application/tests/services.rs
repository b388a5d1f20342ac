use async_trait::async_trait;
use roster_application::{
    AppError, InMemoryRosterRepository, MatchSimulator, NewPlayer, PlayerService, TeamService,
};
use roster_domain::domain_event::{DomainEvent, EventKind};
use roster_domain::error::DomainError;
use roster_domain::eventing::{EventBus, EventBusConfig, EventListener, InMemoryEventBus};
use roster_domain::model::{Player, PlayerId, Team, TeamId};
use roster_domain::persist::PlayerRepository;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<DomainEvent>>,
}

impl Recorder {
    fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    // 不同类型的事件由各自的订阅分别投递，彼此之间没有顺序保证
    fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|e| e.kind() == kind).count()
    }

    fn first_of(&self, kind: EventKind) -> Option<DomainEvent> {
        self.events().into_iter().find(|e| e.kind() == kind)
    }

    async fn wait_for(&self, n: usize) {
        timeout(Duration::from_secs(2), async {
            while self.events.lock().unwrap().len() < n {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("events not delivered in time");
    }
}

#[async_trait]
impl EventListener for Recorder {
    fn listener_name(&self) -> &str {
        "recorder"
    }

    async fn on_event(&self, event: &DomainEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// 指定球队的球员必进球，其余球员不进球
#[derive(Default)]
struct Scripted {
    scoring_teams: Mutex<HashSet<TeamId>>,
}

impl Scripted {
    fn set(&self, teams: &[TeamId]) {
        *self.scoring_teams.lock().unwrap() = teams.iter().copied().collect();
    }
}

impl MatchSimulator for Scripted {
    fn scores(&self, player: &Player) -> bool {
        self.scoring_teams.lock().unwrap().contains(&player.team_id())
    }
}

struct Fixture {
    repo: Arc<InMemoryRosterRepository>,
    bus: Arc<InMemoryEventBus>,
    recorder: Arc<Recorder>,
    simulator: Arc<Scripted>,
    teams: TeamService,
    players: PlayerService,
}

fn fixture() -> Fixture {
    let repo = Arc::new(InMemoryRosterRepository::new());
    let bus = Arc::new(InMemoryEventBus::new(EventBusConfig::default()));
    let recorder = Arc::new(Recorder::default());
    for kind in EventKind::ALL {
        bus.subscribe(kind, recorder.clone()).unwrap();
    }
    let simulator = Arc::new(Scripted::default());

    let teams = TeamService::builder()
        .teams(repo.clone())
        .players(repo.clone())
        .event_bus(bus.clone())
        .simulator(simulator.clone())
        .build();
    let players = PlayerService::builder()
        .teams(repo.clone())
        .players(repo.clone())
        .event_bus(bus.clone())
        .build();

    Fixture {
        repo,
        bus,
        recorder,
        simulator,
        teams,
        players,
    }
}

fn new_player(team_id: TeamId, name: &str, squad: u8) -> NewPlayer {
    NewPlayer::builder()
        .team_id(team_id)
        .full_name(name)
        .birth_year(1998)
        .field_location("Defender")
        .squad_number(squad)
        .build()
}

async fn team(fx: &Fixture, name: &str) -> Team {
    fx.teams.create_team(name, "Porto", "Coach", "4-4-2").await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn create_team_persists_and_publishes() {
    let fx = fixture();
    let created = team(&fx, "  Dragons ").await;
    assert_eq!(created.name(), "Dragons");

    fx.recorder.wait_for(1).await;
    match &fx.recorder.events()[0] {
        DomainEvent::TeamCreated(e) => {
            assert_eq!(e.team_id, created.id());
            assert_eq!(e.name, "Dragons");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(fx.teams.find_team(&created.id()).await.unwrap(), created);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_team_is_rejected_without_event() {
    let fx = fixture();
    let err = fx.teams.create_team(" ", "Porto", "Coach", "4-4-2").await.unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));

    sleep(Duration::from_millis(50)).await;
    assert!(fx.recorder.events().is_empty());
    assert!(fx.teams.find_all_teams().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn add_player_requires_existing_team_and_unique_squad_number() {
    let fx = fixture();
    let t = team(&fx, "Dragons").await;

    let p = fx.players.add_player(new_player(t.id(), "Ana Silva", 4)).await.unwrap();
    assert_eq!(p.goals(), 0);

    let dup = fx.players.add_player(new_player(t.id(), "Rui Costa", 4)).await.unwrap_err();
    assert!(matches!(dup, AppError::SquadNumberTaken { squad_number: 4, .. }));

    let out_of_range = fx.players.add_player(new_player(t.id(), "Rui Costa", 101)).await.unwrap_err();
    assert!(matches!(
        out_of_range,
        AppError::Domain(DomainError::InvalidSquadNumber { .. })
    ));

    let missing = TeamId::new();
    let err = fx.players.add_player(new_player(missing, "Rui Costa", 5)).await.unwrap_err();
    assert!(matches!(err, AppError::TeamNotFound(id) if id == missing));

    fx.recorder.wait_for(2).await;
    assert_eq!(fx.recorder.count(EventKind::TeamCreated), 1);
    assert_eq!(fx.recorder.count(EventKind::PlayerAdded), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn same_squad_number_is_allowed_across_teams() {
    let fx = fixture();
    let a = team(&fx, "A").await;
    let b = team(&fx, "B").await;
    fx.players.add_player(new_player(a.id(), "Ana Silva", 10)).await.unwrap();
    fx.players.add_player(new_player(b.id(), "Rui Costa", 10)).await.unwrap();
    assert_eq!(player_count(&fx.repo).await, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_player_and_missing_player() {
    let fx = fixture();
    let t = team(&fx, "Dragons").await;
    let p = fx.players.add_player(new_player(t.id(), "Ana Silva", 4)).await.unwrap();

    let removed = fx.players.delete_player(&p.id()).await.unwrap();
    assert_eq!(removed.id(), p.id());

    let err = fx.players.find_player(&p.id()).await.unwrap_err();
    assert!(matches!(err, AppError::PlayerNotFound(_)));
    let err = fx.players.delete_player(&PlayerId::new()).await.unwrap_err();
    assert!(matches!(err, AppError::PlayerNotFound(_)));

    fx.recorder.wait_for(3).await;
    assert_eq!(fx.recorder.count(EventKind::PlayerDeleted), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_players_by_team_removes_only_that_team() {
    let fx = fixture();
    let a = team(&fx, "A").await;
    let b = team(&fx, "B").await;
    for squad in 1..=3 {
        fx.players.add_player(new_player(a.id(), "Player A", squad)).await.unwrap();
    }
    fx.players.add_player(new_player(b.id(), "Player B", 1)).await.unwrap();

    assert_eq!(fx.players.delete_players_by_team(&a.id()).await.unwrap(), 3);
    assert!(fx.players.find_players_by_team(&a.id()).await.unwrap().is_empty());
    assert_eq!(fx.players.find_players_by_team(&b.id()).await.unwrap().len(), 1);

    // 2 TeamCreated + 4 PlayerAdded + 3 PlayerDeleted
    fx.recorder.wait_for(9).await;
    assert_eq!(fx.recorder.count(EventKind::PlayerDeleted), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_team_cascades_and_reports_missing() {
    let fx = fixture();
    let t = team(&fx, "Dragons").await;
    fx.players.add_player(new_player(t.id(), "Ana Silva", 4)).await.unwrap();

    fx.teams.delete_team(&t.id()).await.unwrap();
    assert!(player_count(&fx.repo).await == 0);

    let err = fx.teams.delete_team(&t.id()).await.unwrap_err();
    assert!(matches!(err, AppError::TeamNotFound(_)));
    let err = fx.players.find_players_by_team(&t.id()).await.unwrap_err();
    assert!(matches!(err, AppError::TeamNotFound(_)));

    fx.recorder.wait_for(3).await;
    match fx.recorder.first_of(EventKind::TeamDeleted) {
        Some(DomainEvent::TeamDeleted(e)) => assert_eq!(e.name, "Dragons"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn simulate_match_records_goals_and_winner() {
    let fx = fixture();
    let a = team(&fx, "A").await;
    let b = team(&fx, "B").await;
    for squad in 1..=2 {
        fx.players.add_player(new_player(a.id(), "Player A", squad)).await.unwrap();
        fx.players.add_player(new_player(b.id(), "Player B", squad)).await.unwrap();
    }
    fx.simulator.set(&[a.id()]);

    let outcome = fx.teams.simulate_match(&a.id(), &b.id()).await.unwrap();
    assert_eq!((outcome.goals_a, outcome.goals_b), (2, 0));
    assert_eq!(outcome.winner(), Some(a.id()));
    assert_eq!(outcome.to_string(), "A 2 x 0 B (A wins)");

    assert_eq!(fx.teams.find_team(&a.id()).await.unwrap().matches_won(), 1);
    assert_eq!(fx.teams.find_team(&b.id()).await.unwrap().matches_won(), 0);
    let goals: Vec<u32> = fx
        .players
        .find_players_by_team(&a.id())
        .await
        .unwrap()
        .iter()
        .map(Player::goals)
        .collect();
    assert_eq!(goals, [1, 1]);

    // 2 TeamCreated + 4 PlayerAdded + MatchSimulated
    fx.recorder.wait_for(7).await;
    match fx.recorder.first_of(EventKind::MatchSimulated) {
        Some(DomainEvent::MatchSimulated(e)) => {
            assert_eq!((e.team_a_id, e.goals_a, e.goals_b), (a.id(), 2, 0));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn draw_publishes_event_without_win() {
    let fx = fixture();
    let a = team(&fx, "A").await;
    let b = team(&fx, "B").await;

    let outcome = fx.teams.simulate_match(&a.id(), &b.id()).await.unwrap();
    assert!(outcome.is_draw());
    assert_eq!(outcome.winner(), None);
    assert_eq!(outcome.to_string(), "A 0 x 0 B (draw)");
    assert_eq!(fx.teams.find_team(&a.id()).await.unwrap().matches_won(), 0);

    fx.recorder.wait_for(3).await;
    assert_eq!(fx.recorder.count(EventKind::MatchSimulated), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn simulate_match_rejects_same_or_missing_team() {
    let fx = fixture();
    let a = team(&fx, "A").await;

    let err = fx.teams.simulate_match(&a.id(), &a.id()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let err = fx.teams.simulate_match(&a.id(), &TeamId::new()).await.unwrap_err();
    assert!(matches!(err, AppError::TeamNotFound(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn summary_counts_players_per_team() {
    let fx = fixture();
    let a = team(&fx, "Alpha").await;
    let b = team(&fx, "Beta").await;
    for squad in 1..=3 {
        fx.players.add_player(new_player(a.id(), "Player A", squad)).await.unwrap();
    }

    let summary = fx.teams.summary().await.unwrap();
    assert_eq!(summary.total_teams, 2);
    assert_eq!(summary.total_players, 3);
    let counts: Vec<(String, usize)> = summary
        .rows
        .iter()
        .map(|r| (r.name.clone(), r.players))
        .collect();
    assert_eq!(counts, [("Alpha".to_string(), 3), ("Beta".to_string(), 0)]);
    assert_eq!(summary.rows[1].team_id, b.id());

    fx.bus.shutdown().await;
}

async fn player_count(repo: &InMemoryRosterRepository) -> usize {
    repo.find_all_players().await.unwrap().len()
}
