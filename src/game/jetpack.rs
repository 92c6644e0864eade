use crate::config::GameConfig;
use crate::error::Result;
use crate::game::logic::{check_collision, compute_reward};
use crate::game::model::{Action, Obstacle, Player};
use crate::game::procedural::{generate_obstacle, select_ahead};
use crate::game::scene::Scene;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::vec_deque::VecDeque;

pub const OBSERVATION_SIZE: usize = 6;

/// What a driver sees after every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Observation {
    pub player_y: f32,
    pub player_velocity: f32,
    pub gap_y: f32,
    pub gap_height: f32,
    pub obstacle_distance: f32,
    /// Positive while the player sits below the gap centre.
    pub gap_center_offset: f32,
}

impl Observation {
    pub fn to_array(&self) -> [f32; OBSERVATION_SIZE] {
        [
            self.player_y,
            self.player_velocity,
            self.gap_y,
            self.gap_height,
            self.obstacle_distance,
            self.gap_center_offset,
        ]
    }
}

impl From<[f32; OBSERVATION_SIZE]> for Observation {
    fn from(values: [f32; OBSERVATION_SIZE]) -> Self {
        Observation {
            player_y: values[0],
            player_velocity: values[1],
            gap_y: values[2],
            gap_height: values[3],
            obstacle_distance: values[4],
            gap_center_offset: values[5],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    pub score: u64,
    pub frame_count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeState {
    Ready,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VelocityStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub samples: u64,
}

#[derive(Clone, Copy, Debug, Default)]
struct VelocityLog {
    min: f32,
    max: f32,
    sum: f64,
    samples: u64,
}

impl VelocityLog {
    fn record(&mut self, velocity: f32) {
        if self.samples == 0 {
            self.min = velocity;
            self.max = velocity;
        } else {
            self.min = self.min.min(velocity);
            self.max = self.max.max(velocity);
        }
        self.sum += f64::from(velocity);
        self.samples += 1;
    }

    fn stats(&self) -> Option<VelocityStats> {
        if self.samples == 0 {
            return None;
        }
        Some(VelocityStats {
            min: self.min,
            max: self.max,
            mean: (self.sum / self.samples as f64) as f32,
            samples: self.samples,
        })
    }
}

/// Frame-stepped jetpack world: one player, a scrolling queue of obstacles
/// and the episode counters.
pub struct JetpackEnv {
    config: GameConfig,
    player: Player,
    obstacles: VecDeque<Obstacle>,
    score: u64,
    frame_count: u64,
    done: bool,
    velocity_log: VelocityLog,
    rng: StdRng,
}

impl JetpackEnv {
    pub fn new(config: GameConfig) -> Result<JetpackEnv> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = Player::new(&config);
        Ok(JetpackEnv {
            config,
            player,
            obstacles: VecDeque::new(),
            score: 0,
            frame_count: 0,
            done: false,
            velocity_log: VelocityLog::default(),
            rng,
        })
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn reset(&mut self) -> Observation {
        self.player.reset();
        self.obstacles.clear();
        self.score = 0;
        self.frame_count = 0;
        self.done = false;
        self.velocity_log = VelocityLog::default();
        self.observation()
    }

    /// Advances the world by one frame.
    ///
    /// Stepping a terminated episode keeps simulating and keeps reporting
    /// `done` with the collision penalty until the next [`reset`].
    ///
    /// [`reset`]: JetpackEnv::reset
    pub fn step(&mut self, action: Action) -> (Observation, f32, bool, StepInfo) {
        self.player.update(action.is_thrust());

        let scroll_speed = self.config.scroll_speed;
        self.obstacles.iter_mut().for_each(|obstacle| obstacle.shift(scroll_speed));

        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| obstacle.right_edge() > 0f32);
        if self.obstacles.len() < before {
            tracing::debug!(
                frame = self.frame_count,
                removed = before - self.obstacles.len(),
                "obstacles left the screen"
            );
        }

        if self.should_spawn() {
            let spawn_x = Some(self.config.screen_width);
            let obstacle = generate_obstacle(&self.config, &mut self.rng, spawn_x);
            tracing::debug!(
                frame = self.frame_count,
                gap_y = obstacle.gap_y(),
                gap_height = obstacle.gap_height(),
                "spawned obstacle"
            );
            self.obstacles.push_back(obstacle);
        }

        self.score += 1;
        self.frame_count += 1;

        if check_collision(&self.config, &self.player, &self.obstacles) && !self.done {
            self.done = true;
            tracing::info!(
                score = self.score,
                frame = self.frame_count,
                "episode terminated by collision"
            );
        }

        let reward = compute_reward(self.done, action);
        self.velocity_log.record(self.player.velocity);
        let observation = self.observation();
        tracing::trace!(?action, reward, ?observation, "step");

        (observation, reward, self.done, self.info())
    }

    fn should_spawn(&self) -> bool {
        if self.obstacles.is_empty() {
            return true;
        }
        let rightmost = self.obstacles.iter().map(Obstacle::x).fold(f32::NEG_INFINITY, f32::max);
        rightmost < self.config.spawn_line()
    }

    pub fn observation(&self) -> Observation {
        let player_y = self.player.pos_y;
        let player_velocity = self.player.velocity;
        match self.next_obstacle() {
            Some(next) => Observation {
                player_y,
                player_velocity,
                gap_y: next.gap_y(),
                gap_height: next.gap_height(),
                obstacle_distance: next.x() - self.player.pos_x,
                gap_center_offset: player_y - next.gap_center(),
            },
            None => Observation {
                player_y,
                player_velocity,
                gap_y: 0f32,
                gap_height: 0f32,
                obstacle_distance: self.config.screen_width - self.player.pos_x,
                gap_center_offset: 0f32,
            },
        }
    }

    /// Closest obstacle the player has not fully passed yet.
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        select_ahead(self.player.pos_x, &self.obstacles)
            .into_iter()
            .min_by(|a, b| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal))
    }

    pub fn render(&self) -> Scene {
        Scene::capture(&self.config, &self.player, &self.obstacles, self.score)
    }

    /// The environment holds nothing outside the process.
    pub fn close(&mut self) {
        tracing::debug!(score = self.score, frame = self.frame_count, "environment closed");
    }

    pub fn info(&self) -> StepInfo {
        StepInfo { score: self.score, frame_count: self.frame_count }
    }

    pub fn state(&self) -> EpisodeState {
        if self.done {
            EpisodeState::Terminated
        } else {
            EpisodeState::Ready
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn velocity_stats(&self) -> Option<VelocityStats> {
        self.velocity_log.stats()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_env() -> JetpackEnv {
        let config = GameConfig { seed: Some(42), ..GameConfig::default() };
        JetpackEnv::new(config).unwrap()
    }

    #[test]
    fn first_step_spawns_at_the_right_edge() {
        let mut env = seeded_env();
        env.reset();
        assert_eq!(env.obstacles().count(), 0);
        env.step(Action::Idle);
        let spawned: Vec<_> = env.obstacles().collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].x(), 1366.0);
    }

    #[test]
    fn spawns_again_once_the_newest_crosses_the_spawn_line() {
        let mut env = seeded_env();
        env.reset();
        env.step(Action::Idle);
        // 1366 - 5n < 1092.8 first holds at n = 55.
        for _ in 0..54 {
            env.player.pos_y = 375.0;
            env.player.velocity = 0.0;
            env.step(Action::Idle);
        }
        assert_eq!(env.obstacles().count(), 1);
        env.player.pos_y = 375.0;
        env.player.velocity = 0.0;
        env.step(Action::Idle);
        let xs: Vec<f32> = env.obstacles().map(Obstacle::x).collect();
        assert_eq!(xs, vec![1366.0 - 55.0 * 5.0, 1366.0]);
    }

    #[test]
    fn obstacles_are_pruned_once_off_screen() {
        let mut env = seeded_env();
        env.reset();
        env.obstacles.push_back(Obstacle::new(&env.config, -46.0, 100.0, 300.0));
        env.obstacles.push_back(Obstacle::new(&env.config, 1300.0, 100.0, 300.0));
        env.step(Action::Idle);
        let xs: Vec<f32> = env.obstacles().map(Obstacle::x).collect();
        assert_eq!(xs, vec![1295.0]);
    }

    #[test]
    fn obstacle_is_pruned_exactly_when_its_right_edge_reaches_zero() {
        let mut env = seeded_env();
        env.reset();
        // x = -45 scrolls to -50, leaving the right edge at exactly 0.
        env.obstacles.push_back(Obstacle::new(&env.config, -45.0, 100.0, 300.0));
        env.step(Action::Idle);
        let xs: Vec<f32> = env.obstacles().map(Obstacle::x).collect();
        assert_eq!(xs, vec![1366.0]);

        env.reset();
        // x = -44.5 scrolls to -49.5, leaving half a pixel on screen.
        env.obstacles.push_back(Obstacle::new(&env.config, -44.5, 100.0, 300.0));
        env.step(Action::Idle);
        let xs: Vec<f32> = env.obstacles().map(Obstacle::x).collect();
        assert_eq!(xs, vec![-49.5, 1366.0]);
        assert_eq!(env.obstacles().next().map(Obstacle::right_edge), Some(0.5));
    }

    #[test]
    fn observation_defaults_without_obstacles() {
        let mut env = seeded_env();
        let observation = env.reset();
        assert_eq!(
            observation.to_array(),
            [375.0, 0.0, 0.0, 0.0, 1366.0 - 200.0, 0.0]
        );
    }

    #[test]
    fn observation_tracks_the_closest_obstacle_ahead() {
        let mut env = seeded_env();
        env.reset();
        let config = env.config.clone();
        env.obstacles.push_back(Obstacle::new(&config, 100.0, 10.0, 300.0));
        env.obstacles.push_back(Obstacle::new(&config, 600.0, 200.0, 300.0));
        env.obstacles.push_back(Obstacle::new(&config, 400.0, 120.0, 320.0));
        let observation = env.observation();
        assert_eq!(observation.gap_y, 120.0);
        assert_eq!(observation.gap_height, 320.0);
        assert_eq!(observation.obstacle_distance, 200.0);
        assert_eq!(observation.gap_center_offset, 375.0 - 280.0);
    }

    #[test]
    fn done_is_sticky_until_reset() {
        let mut env = seeded_env();
        env.reset();
        env.player.pos_y = -10.0;
        let (_, reward, done, _) = env.step(Action::Idle);
        assert!(done);
        assert_eq!(reward, -100.0);
        assert_eq!(env.state(), EpisodeState::Terminated);
        env.player.pos_y = 375.0;
        env.player.velocity = 0.0;
        let (_, reward, done, _) = env.step(Action::Idle);
        assert!(done);
        assert_eq!(reward, -100.0);
        env.reset();
        assert_eq!(env.state(), EpisodeState::Ready);
        assert_eq!(env.info(), StepInfo::default());
    }

    #[test]
    fn velocity_stats_cover_the_episode() {
        let mut env = seeded_env();
        env.reset();
        assert_eq!(env.velocity_stats(), None);
        env.step(Action::Thrust);
        env.step(Action::Idle);
        env.step(Action::Idle);
        let stats = env.velocity_stats().unwrap();
        assert_eq!(stats.samples, 3);
        assert!((stats.min - -0.6).abs() < 1e-5);
        assert!((stats.max - 0.2).abs() < 1e-5);
        assert!((stats.mean - (-0.6 + -0.2 + 0.2) / 3.0).abs() < 1e-5);
        env.reset();
        assert_eq!(env.velocity_stats(), None);
    }

    #[test]
    fn reseeding_replays_the_same_obstacles() {
        let mut env = seeded_env();
        let mut gaps = Vec::new();
        for _ in 0..2 {
            env.reseed(9);
            env.reset();
            env.step(Action::Idle);
            gaps.push(env.observation().gap_y);
        }
        assert_eq!(gaps[0], gaps[1]);
    }
}
