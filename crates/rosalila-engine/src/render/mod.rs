//! GPU rendering subsystem.
//!
//! [`SpriteRenderer`] consumes a [`DrawQueue`](crate::canvas::DrawQueue) and
//! issues wgpu commands. It owns its pipeline, sampler and vertex/index
//! buffers; textures are owned by the caller.
//!
//! Convention:
//! - CPU geometry arrives in pivot-local logical pixels.
//! - Each call is projected to clip space on the CPU with its own transform;
//!   the vertex shader is a passthrough.

mod common;
mod ctx;
mod sprite;

pub use common::{GpuVertex, Segment};
pub use ctx::{RenderCtx, RenderTarget};
pub use sprite::{SpriteRenderer, TextureSet};
