//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring and presenting frames
//! - collecting asynchronous backend errors for the render thread to report

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::{PlatformErrors, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use init::GpuInit;
