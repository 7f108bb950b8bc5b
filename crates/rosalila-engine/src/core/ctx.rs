use crate::graphics::Graphics;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Graphics<'w>`
pub struct FrameCtx<'a, 'w> {
    pub gfx: &'a mut Graphics<'w>,
    /// Index of the frame being built, starting at 0.
    pub frame: u64,
}
