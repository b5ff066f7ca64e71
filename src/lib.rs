// Library exports for testing
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::GameConfig;
pub use entities::{Bullet, Enemy, GameState, Outcome, Player, SpriteId, Star, Tint};
pub use game::{Game, GameEvent, Steer};
pub use geometry::{Bounds, overlaps};

pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod spawner;
