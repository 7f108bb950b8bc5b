use glam::Vec2;

/// Screen-space extents of a sprite quad.
///
/// `(x1, y1)` is the corner drawn with texture coordinate `(0, 0)` and
/// `(x2, y2)` the one drawn with `(1, 1)`. A horizontal flip swaps `x1` and
/// `x2`, so `x1 > x2` is a legal state.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    #[inline]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Quad at `position` with `size * scale` extents.
    #[inline]
    pub fn from_position_size(x: i32, y: i32, width: i32, height: i32, scale: f32) -> Self {
        let x = x as f32;
        let y = y as f32;
        Self::new(x, y, x + width as f32 * scale, y + height as f32 * scale)
    }

    /// Swaps the horizontal extents. Vertical extents are untouched.
    #[inline]
    pub fn flipped_horizontally(self) -> Self {
        Self { x1: self.x2, x2: self.x1, ..self }
    }

    /// Center of the quad; independent of flip.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    #[inline]
    pub fn min_x(self) -> f32 {
        self.x1.min(self.x2)
    }

    #[inline]
    pub fn max_x(self) -> f32 {
        self.x1.max(self.x2)
    }

    /// Corners in drawing order: `(x1,y1) (x2,y1) (x2,y2) (x1,y2)`.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        [
            Vec2::new(self.x1, self.y1),
            Vec2::new(self.x2, self.y1),
            Vec2::new(self.x2, self.y2),
            Vec2::new(self.x1, self.y2),
        ]
    }
}
