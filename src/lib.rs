//! # Jetpack RL
//!
//! A small side-scrolling jetpack game built as a reinforcement-learning
//! environment. The player hangs at a fixed horizontal position while pairs
//! of barriers scroll in from the right; every frame the driver decides
//! whether to fire the jetpack.
//!
//! - [`game::jetpack::JetpackEnv`] is the frame-stepped simulation with the
//!   native `(observation, reward, done, info)` step.
//! - [`gym::JetpackGym`] wraps it for training libraries that expect discrete
//!   action spaces, bounded observations and `terminated`/`truncated` flags.
//! - [`ai`] holds simple driving policies used by the `jetpack` binary.

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod gym;

pub use config::GameConfig;
pub use error::{JetpackError, Result};
pub use game::jetpack::{
    EpisodeState, JetpackEnv, Observation, StepInfo, VelocityStats, OBSERVATION_SIZE,
};
pub use game::model::{Action, Obstacle, Player};
pub use gym::{Environment, JetpackGym, Transition};
