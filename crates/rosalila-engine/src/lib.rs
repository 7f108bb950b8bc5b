//! Rosalila engine crate.
//!
//! A small 2D engine: window + wgpu surface setup, a sprite/text renderer with
//! camera-relative parallax, flat shadows, screen shake and grayscale blending,
//! and a capped-rate presentation loop.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod error;
pub mod config;
pub mod coords;
pub mod paint;
pub mod effects;
pub mod shadow;
pub mod texture;
pub mod text;
pub mod canvas;
pub mod render;
pub mod graphics;

pub use error::EngineError;
pub use graphics::Graphics;
