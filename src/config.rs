use crate::error::{JetpackError, Result};
use serde::Deserialize;
use std::path::Path;

/// Every tunable constant of the game.
///
/// Geometry is in screen pixels with the origin in the top left corner and
/// `y` growing downwards, so gravity is positive and thrust negative.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub gravity: f32,
    pub thrust: f32,
    pub obstacle_width: f32,
    /// Gap height the sampling margin is computed from. Generated obstacles
    /// draw their actual gap height from `gap_height_min..=gap_height_max`.
    pub gap_height: u32,
    pub gap_margin: u32,
    pub gap_height_min: u32,
    pub gap_height_max: u32,
    pub scroll_speed: f32,
    /// Fraction of the screen width the newest obstacle has to scroll past
    /// before the next one spawns.
    pub spawn_threshold: f32,
    /// Episode budget for drivers. The environment itself never truncates.
    pub max_frames: u64,
    /// Frame rate the game was tuned for. Used to report episode lengths in
    /// seconds.
    pub fps: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: 1366.0,
            screen_height: 768.0,
            player_width: 30.0,
            player_height: 30.0,
            player_start_x: 200.0,
            player_start_y: 375.0,
            gravity: 0.4,
            thrust: -1.0,
            obstacle_width: 50.0,
            gap_height: 150,
            gap_margin: 50,
            gap_height_min: 300,
            gap_height_max: 500,
            scroll_speed: 5.0,
            spawn_threshold: 0.8,
            max_frames: 18_000,
            fps: 60,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| JetpackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Inclusive range `gap_y` is sampled from.
    pub fn gap_y_range(&self) -> (i64, i64) {
        let low = i64::from(self.gap_margin);
        let high =
            self.screen_height as i64 - i64::from(self.gap_height) - i64::from(self.gap_margin);
        (low, high)
    }

    /// Wall-clock length of `frames` at the configured frame rate.
    pub fn frames_to_seconds(&self, frames: u64) -> f64 {
        frames as f64 / f64::from(self.fps)
    }

    pub fn spawn_line(&self) -> f32 {
        self.screen_width * self.spawn_threshold
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("scroll_speed", self.scroll_speed),
        ];
        for (name, value) in positive.iter() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }
        let (low, high) = self.gap_y_range();
        if low > high {
            return Err(invalid(format!(
                "no room for a gap: gap_y would be sampled from {}..={}",
                low, high
            )));
        }
        if self.gap_height_min > self.gap_height_max {
            return Err(invalid(format!(
                "gap_height_min {} exceeds gap_height_max {}",
                self.gap_height_min, self.gap_height_max
            )));
        }
        if self.gap_height_max == u32::MAX {
            return Err(invalid(format!("gap_height_max must be below {}", u32::MAX)));
        }
        if self.fps == 0 {
            return Err(invalid("fps must be positive".to_string()));
        }
        if !(self.spawn_threshold > 0.0 && self.spawn_threshold <= 1.0) {
            return Err(invalid(format!(
                "spawn_threshold must lie in (0, 1], got {}",
                self.spawn_threshold
            )));
        }
        if self.player_start_x < 0.0
            || self.player_start_x + self.player_width > self.screen_width
        {
            return Err(invalid("player start x lies off screen".to_string()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> JetpackError {
    JetpackError::InvalidConfig(reason)
}
