//! Time subsystem.
//!
//! Frame pacing for the presentation loop: call [`FramePacer::cap`] once per
//! presented frame, right before the effects advance.

mod frame_pacer;

pub use frame_pacer::{FramePacer, DEFAULT_FPS};
