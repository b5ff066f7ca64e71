use rand::Rng;

use super::sprite::{Sprite, SpriteId};
use crate::config::GameConfig;

/// Background particle. Never collides and never leaves the field: once it
/// falls past the bottom it reappears at the top.
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// 1, 2 or 3 units across
    pub size: u8,
    pub sprite: Sprite,
}

impl Star {
    pub fn new(x: f32, y: f32, speed: f32, size: u8, sprite_id: SpriteId) -> Self {
        Self {
            x,
            y,
            speed,
            size,
            sprite: Sprite::new(sprite_id),
        }
    }

    /// Star at a random spot anywhere on the field
    pub fn random(config: &GameConfig, rng: &mut impl Rng, sprite_id: SpriteId) -> Self {
        let x = rng.random_range(config.star_x_range());
        let y = rng.random_range(config.star_y_range());
        let speed = rng.random_range(config.star_speed_range());
        let size = rng.random_range(1..=3);
        Self::new(x, y, speed, size, sprite_id)
    }

    pub fn update(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        self.y += self.speed;
        if self.y > config.canvas_height {
            self.y = 0.0;
            self.x = rng.random_range(config.star_x_range());
            self.speed = rng.random_range(config.star_speed_range());
        }
    }
}

/// Fills the background with `config.star_count` stars
pub fn star_field(
    config: &GameConfig,
    rng: &mut impl Rng,
    mut next_id: impl FnMut() -> SpriteId,
) -> Vec<Star> {
    (0..config.star_count)
        .map(|_| Star::random(config, rng, next_id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_star_falls() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = Star::new(10.0, 100.0, 1.5, 2, SpriteId(0));
        star.update(&config, &mut rng);
        assert_eq!(star.y, 101.5);
        assert_eq!(star.x, 10.0);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = Star::new(10.0, 799.5, 1.0, 2, SpriteId(0));
        star.update(&config, &mut rng);
        assert_eq!(star.y, 0.0);
        assert!((0.0..=config.canvas_width).contains(&star.x));
        assert!((config.star_speed_min..=config.star_speed_max).contains(&star.speed));
        assert!(star.sprite.is_visible());
    }

    #[test]
    fn test_star_field_size() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut next = 0;
        let stars = star_field(&config, &mut rng, || {
            next += 1;
            SpriteId(next)
        });
        assert_eq!(stars.len(), 80);
        assert!(stars.iter().all(|s| (1..=3).contains(&s.size)));
    }

    #[test]
    fn test_star_with_swapped_speed_bounds() {
        let config = GameConfig {
            star_speed_min: 2.0,
            star_speed_max: 0.5,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let star = Star::random(&config, &mut rng, SpriteId(0));
        assert!((0.5..=2.0).contains(&star.speed));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_star_stays_on_field(seed in any::<u64>(), ticks in 0usize..2000) {
                let config = GameConfig::default();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut star = Star::random(&config, &mut rng, SpriteId(0));
                for _ in 0..ticks {
                    star.update(&config, &mut rng);
                    prop_assert!(star.y >= 0.0 && star.y <= config.canvas_height);
                }
            }
        }
    }
}
