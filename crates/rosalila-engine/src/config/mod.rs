//! Engine configuration.
//!
//! The configuration document is JSON. Node names follow the engine's asset
//! format (`Resolution`, `ScreenSize`, `Fullscreen`, `Font`).

mod engine_config;

pub use engine_config::{EngineConfig, FontConfig, Fullscreen, Size, FONT_RELATIVE_PATH};
