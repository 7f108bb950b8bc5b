//! Flat shadow geometry.
//!
//! A flat shadow is a textured polygon stretched away from a point light,
//! anchored on silhouette points the host supplies per side of the sprite.
//! Everything here is pure geometry; the canvas turns a [`ShadowPolygon`] into
//! a draw call.

mod descriptor;
mod polygon;

pub use descriptor::FlatShadow;
pub use polygon::{ShadowPolygon, ShadowRegime, ShadowVertex};
