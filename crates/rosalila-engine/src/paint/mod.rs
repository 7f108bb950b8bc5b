//! Per-draw tint colors.
//!
//! Tints are straight-alpha 8-bit channels, blended with
//! `src_alpha / one_minus_src_alpha` by the sprite pipeline.

mod color;

pub use color::ColorEffect;
