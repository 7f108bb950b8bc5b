/// Absolute camera offset in logical pixels.
///
/// Set by the host between frames; the renderer only reads it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

impl Camera {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
