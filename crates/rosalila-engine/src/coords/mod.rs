//! Coordinate and geometry types shared by the canvas and the GPU renderer.
//!
//! Canonical CPU space:
//! - logical pixels of the configured resolution
//! - origin top-left
//! - +X right, +Y down
//!
//! Each draw call projects to clip space with its own [`Viewport`].

mod bounds;
mod viewport;

pub use bounds::Bounds;
pub use viewport::Viewport;
