use async_trait::async_trait;
use roster_domain::domain_event::{DomainEvent, MatchSimulated};
use roster_domain::eventing::EventListener;
use roster_domain::model::TeamId;
use roster_domain::persist::TeamRepository;
use std::cmp::Ordering;
use std::sync::Arc;

/// 把领域事件转成面向用户的提示行（info 级日志）
pub struct UiEventListener {
    teams: Arc<dyn TeamRepository>,
}

impl UiEventListener {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// 尽量用球队名称代替标识
    async fn team_label(&self, team_id: &TeamId) -> String {
        match self.teams.find_team(team_id).await {
            Ok(Some(team)) => team.name().to_string(),
            _ => team_id.to_string(),
        }
    }

    pub async fn describe(&self, event: &DomainEvent) -> String {
        match event {
            DomainEvent::TeamCreated(e) => {
                format!("Team created: {} ({}, coach {}, {})", e.name, e.city, e.coach, e.formation)
            }
            DomainEvent::TeamDeleted(e) => format!("Team deleted: {} [{}]", e.name, e.team_id),
            DomainEvent::PlayerAdded(e) => format!(
                "Player {} added to {} with squad number {}",
                e.player_id,
                self.team_label(&e.team_id).await,
                e.squad_number
            ),
            DomainEvent::PlayerDeleted(e) => format!(
                "Player {} removed from {}",
                e.player_id,
                self.team_label(&e.team_id).await
            ),
            DomainEvent::MatchSimulated(e) => self.describe_match(e).await,
        }
    }

    async fn describe_match(&self, e: &MatchSimulated) -> String {
        let a = self.team_label(&e.team_a_id).await;
        let b = self.team_label(&e.team_b_id).await;
        let verdict = match e.goals_a.cmp(&e.goals_b) {
            Ordering::Greater => format!("{a} wins"),
            Ordering::Less => format!("{b} wins"),
            Ordering::Equal => "draw".to_string(),
        };
        format!("Match result: {a} {} x {} {b} ({verdict})", e.goals_a, e.goals_b)
    }
}

#[async_trait]
impl EventListener for UiEventListener {
    fn listener_name(&self) -> &str {
        "ui-feedback"
    }

    async fn on_event(&self, event: &DomainEvent) -> anyhow::Result<()> {
        let line = self.describe(event).await;
        tracing::info!(event = %event.kind(), "{line}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_application::InMemoryRosterRepository;
    use roster_domain::domain_event::{TeamCreated, TeamDeleted};
    use roster_domain::model::Team;

    async fn listener_with(teams: &[Team]) -> UiEventListener {
        let repo = Arc::new(InMemoryRosterRepository::new());
        repo.save_teams(teams.to_vec()).await.unwrap();
        UiEventListener::new(repo)
    }

    fn played(a: &Team, b: &Team, goals_a: u32, goals_b: u32) -> DomainEvent {
        MatchSimulated {
            team_a_id: a.id(),
            team_b_id: b.id(),
            goals_a,
            goals_b,
        }
        .into()
    }

    #[tokio::test]
    async fn match_results_name_the_winner() {
        let a = Team::new("Braga", "Braga", "Coach", "4-4-2").unwrap();
        let b = Team::new("Boavista", "Porto", "Coach", "4-3-3").unwrap();
        let ui = listener_with(&[a.clone(), b.clone()]).await;

        assert_eq!(
            ui.describe(&played(&a, &b, 3, 1)).await,
            "Match result: Braga 3 x 1 Boavista (Braga wins)"
        );
        assert!(ui.describe(&played(&a, &b, 0, 2)).await.ends_with("(Boavista wins)"));
        assert!(ui.describe(&played(&a, &b, 1, 1)).await.ends_with("(draw)"));
    }

    #[tokio::test]
    async fn unknown_team_falls_back_to_id() {
        let ui = listener_with(&[]).await;
        let a = Team::new("Gone", "Nowhere", "Coach", "4-4-2").unwrap();
        let b = Team::new("Also Gone", "Nowhere", "Coach", "4-4-2").unwrap();
        let line = ui.describe(&played(&a, &b, 0, 0)).await;
        assert!(line.contains(&a.id().to_string()));
    }

    #[tokio::test]
    async fn team_events_use_payload_fields() {
        let ui = listener_with(&[]).await;
        let id = TeamId::new();
        let created: DomainEvent = TeamCreated {
            team_id: id,
            name: "Maritimo".into(),
            city: "Funchal".into(),
            coach: "Coach".into(),
            formation: "4-2-3-1".into(),
        }
        .into();
        assert_eq!(
            ui.describe(&created).await,
            "Team created: Maritimo (Funchal, coach Coach, 4-2-3-1)"
        );

        let deleted: DomainEvent = TeamDeleted {
            team_id: id,
            name: "Maritimo".into(),
        }
        .into();
        assert!(ui.on_event(&deleted).await.is_ok());
    }
}
