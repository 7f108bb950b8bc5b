//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single game window, and wires them to
//! [`Graphics`](crate::Graphics).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
