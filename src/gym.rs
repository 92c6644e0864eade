//! Gymnasium-style boundary around [`JetpackEnv`].
//!
//! The simulation keeps its native `(observation, reward, done, info)` step.
//! This module validates raw integer actions, declares the action and
//! observation spaces and splits `done` into `terminated` and `truncated` for
//! training libraries that expect the five-part convention.

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::jetpack::{JetpackEnv, StepInfo, OBSERVATION_SIZE};
use crate::game::model::Action;
use crate::game::scene::Scene;
use rand::Rng;
use std::convert::TryFrom;

/// `n` actions numbered `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub fn contains(&self, action: i64) -> bool {
        action >= 0 && (action as u64) < self.n as u64
    }

    pub fn sample(&self, rng: &mut impl Rng) -> i64 {
        rng.gen_range(0, self.n as i64)
    }
}

/// Per-dimension closed bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpace {
    pub low: [f32; OBSERVATION_SIZE],
    pub high: [f32; OBSERVATION_SIZE],
}

impl BoxSpace {
    pub fn contains(&self, observation: &[f32; OBSERVATION_SIZE]) -> bool {
        observation
            .iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(value, (low, high))| value >= low && value <= high)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub observation: [f32; OBSERVATION_SIZE],
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

pub trait Environment {
    /// Starts a new episode, re-seeding first when a seed is given.
    fn reset(&mut self, seed: Option<u64>) -> ([f32; OBSERVATION_SIZE], StepInfo);

    /// Advances one frame. Actions outside the action space are rejected
    /// without touching the simulation.
    fn step(&mut self, action: i64) -> Result<Transition>;

    fn render(&self) -> Option<Scene> {
        None
    }

    fn close(&mut self) {}

    fn action_space(&self) -> Discrete;

    fn observation_space(&self) -> BoxSpace;
}

pub struct JetpackGym {
    env: JetpackEnv,
    action_space: Discrete,
    observation_space: BoxSpace,
}

impl JetpackGym {
    pub fn new(config: GameConfig) -> Result<JetpackGym> {
        let observation_space = BoxSpace {
            low: [0f32, -50f32, 0f32, 150f32, 0f32, -config.screen_height],
            high: [
                config.screen_height,
                50f32,
                config.screen_height,
                400f32,
                config.screen_width,
                config.screen_height,
            ],
        };
        Ok(JetpackGym {
            env: JetpackEnv::new(config)?,
            action_space: Discrete { n: 2 },
            observation_space,
        })
    }

    pub fn inner(&self) -> &JetpackEnv {
        &self.env
    }
}

impl Environment for JetpackGym {
    fn reset(&mut self, seed: Option<u64>) -> ([f32; OBSERVATION_SIZE], StepInfo) {
        if let Some(seed) = seed {
            self.env.reseed(seed);
        }
        let observation = self.env.reset();
        (observation.to_array(), self.env.info())
    }

    fn step(&mut self, action: i64) -> Result<Transition> {
        let action = Action::try_from(action)?;
        let (observation, reward, done, info) = self.env.step(action);
        Ok(Transition {
            observation: observation.to_array(),
            reward,
            terminated: done,
            truncated: false,
            info,
        })
    }

    fn render(&self) -> Option<Scene> {
        Some(self.env.render())
    }

    fn close(&mut self) {
        self.env.close();
    }

    fn action_space(&self) -> Discrete {
        self.action_space
    }

    fn observation_space(&self) -> BoxSpace {
        self.observation_space
    }
}
