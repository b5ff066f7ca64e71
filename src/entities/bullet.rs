use super::sprite::{Sprite, SpriteId};
use crate::config::GameConfig;
use crate::geometry::Bounds;

#[derive(Debug, Clone)]
pub struct Bullet {
    /// Horizontal center
    pub x: f32,
    /// Bottom edge; the bullet extends `height` units above it
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub sprite: Sprite,
}

impl Bullet {
    pub fn new(x: f32, y: f32, config: &GameConfig, sprite_id: SpriteId) -> Self {
        Self {
            x,
            y,
            width: config.bullet_width,
            height: config.bullet_height,
            speed: config.bullet_speed,
            sprite: Sprite::new(sprite_id),
        }
    }

    pub fn update(&mut self) {
        self.y -= self.speed;
    }

    /// Fully above the top of the play area
    pub fn is_off_screen(&self) -> bool {
        self.y + self.height < 0.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.x - self.width / 2.0,
            self.y - self.height,
            self.x + self.width / 2.0,
            self.y,
        )
    }

    pub fn is_alive(&self) -> bool {
        self.sprite.is_visible()
    }

    /// Returns false if the bullet was already destroyed
    pub fn destroy(&mut self) -> bool {
        self.sprite.hide()
    }
}
