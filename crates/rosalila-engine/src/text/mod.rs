//! Single-font, single-line text rasterization.

mod font_system;

pub use font_system::{FontLoadError, FontSystem, GlyphCoverage};
