use winit::event::WindowEvent;

use crate::graphics::Graphics;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game.
pub trait App {
    /// Called once, after the window and graphics are ready and before the
    /// first frame. Load textures here.
    fn on_start(&mut self, gfx: &mut Graphics<'_>) -> AppControl {
        let _ = gfx;
        AppControl::Continue
    }

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame. Issue draw calls back to front; the runtime
    /// presents the frame after this returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
