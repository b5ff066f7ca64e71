/// Rendering handle owned by exactly one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u64);

/// Hands out unique sprite ids for a session
#[derive(Debug, Default)]
pub struct SpriteIds {
    next: u64,
}

impl SpriteIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> SpriteId {
        let id = SpriteId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    visible: bool,
}

impl Sprite {
    pub fn new(id: SpriteId) -> Self {
        Self { id, visible: true }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Removes the sprite from the scene. Safe to call any number of times;
    /// returns true only for the call that actually hid it.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}
