use crate::config::GameConfig;
use crate::error::JetpackError;
use quicksilver::geom::{Rectangle, Vector};
use std::convert::TryFrom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    Thrust,
}

impl Action {
    pub fn is_thrust(self) -> bool {
        self == Action::Thrust
    }
}

impl TryFrom<i64> for Action {
    type Error = JetpackError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Idle),
            1 => Ok(Action::Thrust),
            other => Err(JetpackError::InvalidAction(other)),
        }
    }
}

impl From<Action> for i64 {
    fn from(action: Action) -> i64 {
        match action {
            Action::Idle => 0,
            Action::Thrust => 1,
        }
    }
}

/// The jetpack pilot. Its horizontal position never changes, the world
/// scrolls past it instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos_x: f32,
    pub pos_y: f32,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    start: Vector,
    gravity: f32,
    thrust: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Player {
        Player {
            pos_x: config.player_start_x,
            pos_y: config.player_start_y,
            velocity: 0f32,
            width: config.player_width,
            height: config.player_height,
            start: Vector::new(config.player_start_x, config.player_start_y),
            gravity: config.gravity,
            thrust: config.thrust,
        }
    }

    pub fn reset(&mut self) {
        self.pos_x = self.start.x;
        self.pos_y = self.start.y;
        self.velocity = 0f32;
    }

    pub fn apply_thrust(&mut self) {
        self.velocity += self.thrust;
    }

    pub fn apply_gravity(&mut self) {
        self.velocity += self.gravity;
    }

    pub fn integrate_position(&mut self) {
        self.pos_y += self.velocity;
    }

    /// Advances one frame. Thrust lands before gravity and both land before
    /// the position moves.
    pub fn update(&mut self, thrust: bool) {
        if thrust {
            self.apply_thrust();
        }
        self.apply_gravity();
        self.integrate_position();
    }

    /// Bounding box snapped to the pixel containing `pos_y`.
    pub fn hitbox(&self) -> Rectangle {
        Rectangle::new((self.pos_x, self.pos_y.floor()), (self.width, self.height))
    }
}

/// A pair of barriers with a passable gap between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pos_x: f32,
    gap_y: f32,
    gap_height: f32,
    width: f32,
    top: Rectangle,
    bottom: Rectangle,
}

impl Obstacle {
    /// Ranges are not checked here.
    ///
    /// The bottom barrier normally spans from the gap's lower edge to the
    /// screen bottom, i.e. `screen_height - (gap_y + gap_height)` tall. A gap
    /// reaching past the screen bottom would make that height negative; it is
    /// clamped to zero instead, so such an obstacle has no bottom barrier.
    pub fn new(config: &GameConfig, pos_x: f32, gap_y: f32, gap_height: f32) -> Obstacle {
        let width = config.obstacle_width;
        let gap_bottom = gap_y + gap_height;
        let top = Rectangle::new((pos_x, 0f32), (width, gap_y));
        let bottom = Rectangle::new(
            (pos_x, gap_bottom),
            (width, (config.screen_height - gap_bottom).max(0f32)),
        );
        Obstacle { pos_x, gap_y, gap_height, width, top, bottom }
    }

    /// Scrolls the obstacle `delta` pixels to the left.
    pub fn shift(&mut self, delta: f32) {
        self.pos_x -= delta;
        self.top.pos.x = self.pos_x;
        self.bottom.pos.x = self.pos_x;
    }

    pub fn x(&self) -> f32 {
        self.pos_x
    }

    pub fn right_edge(&self) -> f32 {
        self.pos_x + self.width
    }

    pub fn gap_y(&self) -> f32 {
        self.gap_y
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_height
    }

    pub fn gap_center(&self) -> f32 {
        self.gap_y + self.gap_height / 2f32
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn top_barrier(&self) -> &Rectangle {
        &self.top
    }

    pub fn bottom_barrier(&self) -> &Rectangle {
        &self.bottom
    }

    pub fn barriers(&self) -> [&Rectangle; 2] {
        [&self.top, &self.bottom]
    }

    pub fn gap_rect(&self) -> Rectangle {
        Rectangle::new((self.pos_x, self.gap_y), (self.width, self.gap_height))
    }
}
