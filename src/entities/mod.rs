mod bullet;
mod enemy;
mod game_state;
mod player;
mod sprite;
mod star;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::{Enemy, sway};
pub use game_state::{GameState, Outcome};
pub use player::Player;
pub use sprite::{Sprite, SpriteId, SpriteIds};
pub use star::{Star, star_field};

/// Entity colors, mapped to terminal colors by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    LightBlue,
    Red,
    Orange,
    Magenta,
    Cyan,
}

impl Tint {
    /// Colors a freshly spawned enemy can take
    pub const ENEMY_PALETTE: [Tint; 4] = [Tint::Red, Tint::Orange, Tint::Magenta, Tint::Cyan];
}
