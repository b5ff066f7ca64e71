use std::time::Duration;

use super::Tint;
use super::sprite::{Sprite, SpriteId};
use crate::geometry::Bounds;

/// Horizontal zig-zag offset for a given age and seed.
///
/// Frequency and amplitude both depend on the seed, so every enemy sways
/// with its own rhythm.
pub fn sway(elapsed_secs: f32, seed: u32) -> f32 {
    let freq = 1.1 + (seed % 3) as f32 * 0.2;
    let amp = 1.2 + (seed % 5) as f32 * 0.5;
    (elapsed_secs * freq + seed as f32).sin() * amp
}

#[derive(Debug, Clone)]
pub struct Enemy {
    /// Center of the enemy
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Downward speed per tick
    pub speed: f32,
    /// Oscillation seed
    pub seed: u32,
    /// Clock reading when the enemy appeared
    pub spawned_at: Duration,
    pub tint: Tint,
    pub sprite: Sprite,
}

impl Enemy {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f32,
        y: f32,
        size: f32,
        speed: f32,
        seed: u32,
        spawned_at: Duration,
        tint: Tint,
        sprite_id: SpriteId,
    ) -> Self {
        Self {
            x,
            y,
            size,
            speed,
            seed,
            spawned_at,
            tint,
            sprite: Sprite::new(sprite_id),
        }
    }

    /// Falls by `speed` and drifts sideways by the sway for its current age
    pub fn update(&mut self, now: Duration, hor_speed: f32) {
        let elapsed = now.saturating_sub(self.spawned_at).as_secs_f32();
        self.y += self.speed;
        self.x += hor_speed * sway(elapsed, self.seed);
    }

    /// Fully below the bottom of the play area
    pub fn is_off_screen(&self, canvas_height: f32) -> bool {
        self.y - self.size / 2.0 > canvas_height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.x, self.y, self.size, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.sprite.is_visible()
    }

    /// Returns false if the enemy was already destroyed
    pub fn destroy(&mut self) -> bool {
        self.sprite.hide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(seed: u32) -> Enemy {
        Enemy::new(300.0, -18.0, 36.0, 2.0, seed, Duration::ZERO, Tint::Red, SpriteId(0))
    }

    #[test]
    fn test_sway_parameters() {
        // seed 0: freq 1.1, amp 1.2
        assert!((sway(1.0, 0) - 1.1f32.sin() * 1.2).abs() < 1e-5);
        // seed 7: freq 1.1 + 1 * 0.2, amp 1.2 + 2 * 0.5
        let expected = (2.0 * 1.3 + 7.0f32).sin() * 2.2;
        assert!((sway(2.0, 7) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_sway_at_spawn_depends_only_on_seed() {
        assert_eq!(sway(0.0, 0), 0.0);
        assert!((sway(0.0, 4) - 4.0f32.sin() * 3.2).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_falls_and_sways() {
        let mut enemy = enemy(0);
        enemy.update(Duration::from_secs(1), 1.5);
        assert_eq!(enemy.y, -16.0);
        let expected_x = 300.0 + 1.5 * sway(1.0, 0);
        assert!((enemy.x - expected_x).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_uses_age_not_tick_count() {
        let mut early = enemy(3);
        let mut late = enemy(3);
        early.update(Duration::from_millis(100), 1.5);
        late.update(Duration::from_millis(2100), 1.5);
        assert_eq!(early.y, late.y);
        assert!((early.x - late.x).abs() > 1e-3);
    }

    #[test]
    fn test_enemy_off_screen() {
        let mut enemy = enemy(0);
        enemy.y = 818.0;
        assert!(!enemy.is_off_screen(800.0));
        enemy.y = 818.5;
        assert!(enemy.is_off_screen(800.0));
    }

    #[test]
    fn test_enemy_bounds() {
        let enemy = enemy(0);
        assert_eq!(enemy.bounds(), Bounds::new(282.0, -36.0, 318.0, 0.0));
    }

    #[test]
    fn test_enemy_destroy_twice() {
        let mut enemy = enemy(0);
        assert!(enemy.is_alive());
        assert!(enemy.destroy());
        assert!(!enemy.destroy());
        assert!(!enemy.is_alive());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_sway_stays_within_amplitude(t in 0.0f32..600.0, seed in 0u32..=20) {
                let amp = 1.2 + (seed % 5) as f32 * 0.5;
                prop_assert!(sway(t, seed).abs() <= amp + 1e-5);
            }
        }
    }
}
