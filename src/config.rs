use std::ops::RangeInclusive;
use std::time::Duration;

/// Tunables for a game session. `Default` gives the standard arcade setup.
///
/// Fields are public and unchecked. The range helpers below collapse
/// inverted or oversized settings to a single value instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Play area in world units (x grows right, y grows down)
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub fps: u32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Distance of the player's center from the bottom edge
    pub player_bottom_offset: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub enemy_size: f32,
    /// Base downward speed, before level and random bonus
    pub enemy_speed: f32,
    /// Scale of the sideways zig-zag
    pub enemy_hor_speed: f32,
    pub enemy_spawn_delay: Duration,
    pub min_spawn_delay: Duration,
    pub spawn_delay_step: Duration,
    pub max_enemies: usize,
    pub initial_lives: u32,
    pub star_count: usize,
    pub star_speed_min: f32,
    pub star_speed_max: f32,
    pub points_per_kill: u32,
    pub points_per_level: u32,
    pub win_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 800.0,
            fps: 60,
            player_width: 50.0,
            player_height: 30.0,
            player_speed: 8.0,
            player_bottom_offset: 60.0,
            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 12.0,
            enemy_size: 36.0,
            enemy_speed: 2.0,
            enemy_hor_speed: 1.5,
            enemy_spawn_delay: Duration::from_millis(1200),
            min_spawn_delay: Duration::from_millis(350),
            spawn_delay_step: Duration::from_millis(100),
            max_enemies: 10,
            initial_lives: 3,
            star_count: 80,
            star_speed_min: 0.7,
            star_speed_max: 2.0,
            points_per_kill: 100,
            points_per_level: 800,
            win_score: 3000,
        }
    }
}

impl GameConfig {
    /// Target spacing between ticks. Whole milliseconds, so 60 fps gives 16ms.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    /// Levels start at 1 and go up every `points_per_level` points
    pub fn level_for_score(&self, score: u32) -> u32 {
        1 + score / self.points_per_level.max(1)
    }

    /// Spawn positions that keep a whole enemy on the field. An enemy wider
    /// than the field always spawns at its centre.
    pub fn enemy_x_range(&self) -> RangeInclusive<f32> {
        let width = self.canvas_width.max(0.0);
        let low = (self.enemy_size / 2.0).clamp(0.0, width / 2.0);
        low..=width - low
    }

    /// Horizontal positions for stars
    pub fn star_x_range(&self) -> RangeInclusive<f32> {
        0.0..=self.canvas_width.max(0.0)
    }

    /// Vertical positions for stars
    pub fn star_y_range(&self) -> RangeInclusive<f32> {
        0.0..=self.canvas_height.max(0.0)
    }

    /// Star speeds, with the bounds swapped if they were given backwards
    pub fn star_speed_range(&self) -> RangeInclusive<f32> {
        let (min, max) = (self.star_speed_min, self.star_speed_max);
        min.min(max)..=max.max(min)
    }
}
