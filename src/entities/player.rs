use super::Tint;
use super::bullet::Bullet;
use super::sprite::{Sprite, SpriteId};
use crate::config::GameConfig;
use crate::geometry::Bounds;

/// Gap between the ship's nose and a freshly fired bullet
const MUZZLE_GAP: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Player {
    /// Center of the ship
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity, held until changed by input
    pub vx: f32,
    pub tint: Tint,
    pub sprite: Sprite,
}

impl Player {
    /// Ship centered horizontally near the bottom of the play area
    pub fn new(config: &GameConfig, sprite_id: SpriteId) -> Self {
        Self {
            x: (config.canvas_width / 2.0).floor(),
            y: config.canvas_height - config.player_bottom_offset,
            width: config.player_width,
            height: config.player_height,
            vx: 0.0,
            tint: Tint::LightBlue,
            sprite: Sprite::new(sprite_id),
        }
    }

    pub fn set_velocity(&mut self, vx: f32) {
        self.vx = vx;
    }

    /// Applies velocity, then clamps to [width/2, canvas_width - width/2]
    pub fn update(&mut self, canvas_width: f32) {
        self.x += self.vx;
        let half = self.width / 2.0;
        if self.x - half < 0.0 {
            self.x = half;
        }
        if self.x + half > canvas_width {
            self.x = canvas_width - half;
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.x, self.y, self.width, self.height)
    }

    /// Creates a bullet just above the ship's nose
    pub fn fire(&self, config: &GameConfig, sprite_id: SpriteId) -> Bullet {
        let (x, y) = self.center();
        let muzzle_y = y - (self.height / 2.0).floor() - MUZZLE_GAP;
        Bullet::new(x, muzzle_y, config, sprite_id)
    }
}
