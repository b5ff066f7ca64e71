use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::GameConfig;
use crate::entities::{Enemy, SpriteId, Tint};

/// Highest oscillation seed handed to a new enemy
const MAX_SEED: u32 = 20;
/// Upper bound of the random bonus added to an enemy's fall speed
const SPEED_JITTER: f32 = 0.8;
/// Extra fall speed per level above the first
const SPEED_PER_LEVEL: f32 = 0.5;
/// Extra enemies allowed on screen per level above the first
const CAP_PER_LEVEL: usize = 2;

/// Minimum time between spawn attempts at `level`
pub fn spawn_delay(config: &GameConfig, level: u32) -> Duration {
    let reduction = config.spawn_delay_step * level.saturating_sub(1);
    config
        .enemy_spawn_delay
        .saturating_sub(reduction)
        .max(config.min_spawn_delay)
}

/// Most enemies allowed on screen at `level`
pub fn enemy_cap(config: &GameConfig, level: u32) -> usize {
    config.max_enemies + level.saturating_sub(1) as usize * CAP_PER_LEVEL
}

/// Time-gated enemy creation
#[derive(Debug, Default)]
pub struct Spawner {
    last_attempt: Option<Duration>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last attempt, so the next call may spawn right away
    pub fn reset(&mut self) {
        self.last_attempt = None;
    }

    /// Tries to create one enemy.
    ///
    /// An attempt is made only once the level's delay has passed since the
    /// previous attempt. A full screen still counts as an attempt, so the
    /// cap throttles to the same cadence instead of spawning the moment a
    /// slot frees up.
    pub fn try_spawn(
        &mut self,
        now: Duration,
        level: u32,
        live_enemies: usize,
        config: &GameConfig,
        rng: &mut impl Rng,
        sprite_id: impl FnOnce() -> SpriteId,
    ) -> Option<Enemy> {
        if let Some(last) = self.last_attempt
            && now.saturating_sub(last) < spawn_delay(config, level)
        {
            return None;
        }
        self.last_attempt = Some(now);

        if live_enemies >= enemy_cap(config, level) {
            return None;
        }

        let half = config.enemy_size / 2.0;
        let x = rng.random_range(config.enemy_x_range());
        let y = -half;
        let speed = config.enemy_speed
            + level.saturating_sub(1) as f32 * SPEED_PER_LEVEL
            + rng.random::<f32>() * SPEED_JITTER;
        let seed = rng.random_range(0..=MAX_SEED);
        let tint = *Tint::ENEMY_PALETTE.choose(rng).unwrap_or(&Tint::Red);

        Some(Enemy::new(
            x,
            y,
            config.enemy_size,
            speed,
            seed,
            now,
            tint,
            sprite_id(),
        ))
    }
}
