use crate::config::GameConfig;
use crate::game::jetpack::Observation;
use crate::game::model::Action;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Policy {
    fn decide(&mut self, observation: &Observation) -> Action;
}

/// Never thrusts.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn decide(&mut self, _observation: &Observation) -> Action {
        Action::Idle
    }
}

#[derive(Debug, Clone)]
pub struct RandomPolicy {
    thrust_percent_chance: usize,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(thrust_percent_chance: usize, seed: Option<u64>) -> RandomPolicy {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomPolicy { thrust_percent_chance, rng }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, _observation: &Observation) -> Action {
        if self.rng.gen_range(0, 100) < self.thrust_percent_chance {
            Action::Thrust
        } else {
            Action::Idle
        }
    }
}

/// Steers towards the visible middle of the next gap, or the middle of the
/// screen while no obstacle is ahead, looking a few frames ahead to damp the
/// oscillation.
#[derive(Debug, Clone, Copy)]
pub struct GapFollower {
    screen_height: f32,
    player_height: f32,
    lookahead_frames: f32,
}

impl GapFollower {
    pub fn new(config: &GameConfig) -> GapFollower {
        GapFollower {
            screen_height: config.screen_height,
            player_height: config.player_height,
            lookahead_frames: 10f32,
        }
    }

    fn target_y(&self, observation: &Observation) -> f32 {
        let lowest = self.screen_height - self.player_height;
        if observation.gap_height <= 0f32 {
            return lowest / 2f32;
        }
        let gap_bottom = (observation.gap_y + observation.gap_height).min(self.screen_height);
        let middle = (observation.gap_y + gap_bottom) / 2f32 - self.player_height / 2f32;
        middle.max(0f32).min(lowest)
    }
}

impl Policy for GapFollower {
    fn decide(&mut self, observation: &Observation) -> Action {
        let predicted_y =
            observation.player_y + observation.player_velocity * self.lookahead_frames;
        if predicted_y > self.target_y(observation) {
            Action::Thrust
        } else {
            Action::Idle
        }
    }
}
