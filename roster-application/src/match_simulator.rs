use rand::Rng;
use roster_domain::model::Player;
use std::sync::Arc;

/// 决定单个球员在一场比赛中是否进球
pub trait MatchSimulator: Send + Sync {
    fn scores(&self, player: &Player) -> bool;
}

/// 每名球员独立按固定概率进球（默认 1/2）
#[derive(Debug, Clone, Copy)]
pub struct RandomMatchSimulator {
    probability: f64,
}

impl RandomMatchSimulator {
    /// 概率会被钳制到 [0, 1]
    pub fn with_probability(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for RandomMatchSimulator {
    fn default() -> Self {
        Self::with_probability(0.5)
    }
}

impl MatchSimulator for RandomMatchSimulator {
    fn scores(&self, _player: &Player) -> bool {
        rand::rng().random_bool(self.probability)
    }
}

impl<T> MatchSimulator for Arc<T>
where
    T: MatchSimulator + ?Sized,
{
    fn scores(&self, player: &Player) -> bool {
        (**self).scores(player)
    }
}

pub(crate) fn default_simulator() -> Arc<dyn MatchSimulator> {
    Arc::new(RandomMatchSimulator::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_domain::model::TeamId;

    fn player() -> Player {
        Player::new(TeamId::new(), "Striker", 1999, "Forward", 9).unwrap()
    }

    #[test]
    fn certain_and_impossible_probabilities() {
        let p = player();
        let always = RandomMatchSimulator::with_probability(1.0);
        let never = RandomMatchSimulator::with_probability(0.0);
        assert!((0..50).all(|_| always.scores(&p)));
        assert!((0..50).all(|_| !never.scores(&p)));
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(RandomMatchSimulator::with_probability(3.0).probability(), 1.0);
        assert_eq!(RandomMatchSimulator::with_probability(-1.0).probability(), 0.0);
        assert_eq!(RandomMatchSimulator::default().probability(), 0.5);
    }
}
