/// Axis-aligned rectangle in world units. `top < bottom` since y grows down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size centered on (x, y)
    pub fn centered(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x - width / 2.0, y - height / 2.0, x + width / 2.0, y + height / 2.0)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        overlaps(self, other)
    }
}

/// True unless one rectangle lies entirely left, right, above or below the
/// other. Shared edges count as overlap.
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}
