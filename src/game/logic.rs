use crate::config::GameConfig;
use crate::game::model::{Action, Obstacle, Player};
use quicksilver::geom::{Rectangle, Shape};

pub const SURVIVAL_REWARD: f32 = 1f32;
pub const COLLISION_PENALTY: f32 = -100f32;

/// True when the player touches a barrier or leaves the screen vertically.
pub fn check_collision<'a>(
    config: &GameConfig,
    player: &Player,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> bool {
    let hitbox = player.hitbox();
    let hit_barrier = obstacles
        .into_iter()
        .flat_map(|obstacle| obstacle.barriers().to_vec())
        .any(|barrier| solid_overlap(&hitbox, barrier));
    hit_barrier || player.pos_y < 0f32 || player.pos_y + player.height > config.screen_height
}

/// The action does not shape the reward yet.
pub fn compute_reward(collision: bool, _action: Action) -> f32 {
    if collision {
        COLLISION_PENALTY
    } else {
        SURVIVAL_REWARD
    }
}

/// Overlap of two rectangles with positive area. Touching edges and empty
/// rectangles never count.
fn solid_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    let has_area = |rect: &Rectangle| rect.size.x > 0f32 && rect.size.y > 0f32;
    has_area(a) && has_area(b) && a.overlaps(b)
}
