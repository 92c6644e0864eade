use crate::config::GameConfig;
use crate::game::model::Obstacle;
use rand::Rng;

/// Builds an obstacle at `pos_x` (the right screen edge when `None`) with a
/// random gap.
///
/// `gap_y` keeps `gap_margin` away from both screen edges assuming the fixed
/// `gap_height`, while the actual gap height is drawn from the wider
/// `gap_height_min..=gap_height_max` range. The two can disagree, so a gap
/// may reach past the bottom of the screen.
pub fn generate_obstacle(config: &GameConfig, rng: &mut impl Rng, pos_x: Option<f32>) -> Obstacle {
    let pos_x = pos_x.unwrap_or(config.screen_width);
    let (gap_y_min, gap_y_max) = config.gap_y_range();
    let gap_y = rng.gen_range(gap_y_min, gap_y_max + 1) as f32;
    let gap_height = rng.gen_range(config.gap_height_min, config.gap_height_max + 1) as f32;
    if gap_y + gap_height > config.screen_height {
        tracing::debug!(
            gap_y,
            gap_height,
            overrun = gap_y + gap_height - config.screen_height,
            "generated gap reaches past the screen bottom"
        );
    }
    Obstacle::new(config, pos_x, gap_y, gap_height)
}

/// Obstacles whose right edge is still strictly right of `reference_x`, in
/// their original order.
pub fn select_ahead<'a>(
    reference_x: f32,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Vec<&'a Obstacle> {
    obstacles
        .into_iter()
        .filter(|obstacle| obstacle.right_edge() > reference_x)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_obstacles() {
        let config = GameConfig::default();
        let mut first = StdRng::seed_from_u64(11);
        let mut second = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            assert_eq!(
                generate_obstacle(&config, &mut first, None),
                generate_obstacle(&config, &mut second, None)
            );
        }
    }

    #[test]
    fn explicit_position_is_used() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let obstacle = generate_obstacle(&config, &mut rng, Some(420.0));
        assert_eq!(obstacle.x(), 420.0);
        assert_eq!(obstacle.top_barrier().pos.x, 420.0);
    }

    #[test]
    fn degenerate_ranges_yield_fixed_gap() {
        let config = GameConfig {
            gap_margin: 100,
            gap_height: 568,
            gap_height_min: 200,
            gap_height_max: 200,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let obstacle = generate_obstacle(&config, &mut rng, None);
        assert_eq!(obstacle.gap_y(), 100.0);
        assert_eq!(obstacle.gap_height(), 200.0);
    }
}
