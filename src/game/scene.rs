use crate::config::GameConfig;
use crate::game::model::{Obstacle, Player};
use crate::game::MinMax;
use quicksilver::geom::{Rectangle, Vector};
use quicksilver::graphics::Color;

/// Drawable snapshot of one frame. Barriers are clipped to the visible
/// screen, barriers with nothing visible are left out.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub size: Vector,
    pub background: Color,
    pub player: (Rectangle, Color),
    pub barriers: Vec<(Rectangle, Color)>,
    pub score: u64,
}

impl Scene {
    pub fn capture<'a>(
        config: &GameConfig,
        player: &Player,
        obstacles: impl IntoIterator<Item = &'a Obstacle>,
        score: u64,
    ) -> Scene {
        let size = Vector::new(config.screen_width, config.screen_height);
        let barriers = obstacles
            .into_iter()
            .flat_map(|obstacle| obstacle.barriers().to_vec())
            .filter_map(|barrier| clip_to_screen(barrier, size))
            .map(|barrier| (barrier, Color::BLACK))
            .collect();
        Scene {
            size,
            background: Color::WHITE,
            player: (player.hitbox(), Color::RED),
            barriers,
            score,
        }
    }
}

fn clip_to_screen(rect: &Rectangle, size: Vector) -> Option<Rectangle> {
    let left = rect.pos.x.min_max(0f32, size.x);
    let right = (rect.pos.x + rect.size.x).min_max(0f32, size.x);
    if right <= left || rect.size.y <= 0f32 {
        return None;
    }
    Some(Rectangle::new((left, rect.pos.y), (right - left, rect.size.y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barriers_are_clipped_to_the_screen() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let entering = Obstacle::new(&config, 1346.0, 100.0, 300.0);
        let leaving = Obstacle::new(&config, -20.0, 100.0, 300.0);
        let scene = Scene::capture(&config, &player, &[entering, leaving], 12);

        assert_eq!(scene.barriers.len(), 4);
        let widths: Vec<f32> = scene.barriers.iter().map(|(rect, _)| rect.size.x).collect();
        assert_eq!(widths, vec![20.0, 20.0, 30.0, 30.0]);
        assert_eq!(scene.barriers[2].0.pos.x, 0.0);
        assert_eq!(scene.score, 12);
        assert_eq!(scene.player.0, player.hitbox());
    }

    #[test]
    fn offscreen_and_empty_barriers_are_dropped() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let offscreen = Obstacle::new(&config, 1366.0, 100.0, 300.0);
        let overflowing = Obstacle::new(&config, 600.0, 500.0, 400.0);
        let scene = Scene::capture(&config, &player, &[offscreen, overflowing], 0);

        assert_eq!(scene.barriers.len(), 1);
        assert_eq!(scene.barriers[0].0, Rectangle::new((600f32, 0f32), (50f32, 500f32)));
    }
}
