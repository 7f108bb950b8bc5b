use glam::Vec2;

use crate::texture::TextureId;

/// Describes the shadow a sprite casts from a point light.
///
/// Silhouette points are offsets from the sprite corner they attach to:
/// - `points_right[0]` from `(x1, y2)`, `points_right[1]` from `(x2, y1)`
/// - `points_left[0]` from `(x1, y1)`, `points_left[1]` from `(x2, y2)`
/// - `points_top[0]` from `(x1, y1)`, `points_top[1]` from `(x2, y1)`
///
/// In-between points are offsets from the first silhouette point of their
/// side and trace the outline between the two anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatShadow {
    pub image: TextureId,
    pub light_x: f32,
    pub light_y: f32,
    /// Scale applied to the light-to-corner vector for the far edge.
    pub length: f32,
    /// Alpha at the silhouette edge.
    pub alpha_init: u8,
    /// Alpha at the far edge.
    pub alpha_end: u8,
    pub points_left: Vec<Vec2>,
    pub points_right: Vec<Vec2>,
    pub points_top: Vec<Vec2>,
    pub inbetween_points_left: Vec<Vec2>,
    pub inbetween_points_right: Vec<Vec2>,
}

impl FlatShadow {
    /// Shadow with no silhouette points; casts nothing until points are added.
    pub fn new(image: TextureId, light_x: f32, light_y: f32, length: f32) -> Self {
        Self {
            image,
            light_x,
            light_y,
            length,
            alpha_init: 255,
            alpha_end: 0,
            points_left: Vec::new(),
            points_right: Vec::new(),
            points_top: Vec::new(),
            inbetween_points_left: Vec::new(),
            inbetween_points_right: Vec::new(),
        }
    }

    pub fn with_alpha(mut self, alpha_init: u8, alpha_end: u8) -> Self {
        self.alpha_init = alpha_init;
        self.alpha_end = alpha_end;
        self
    }

    /// A light at the origin means "no light".
    #[inline]
    pub fn has_light(&self) -> bool {
        self.light_x != 0.0 || self.light_y != 0.0
    }

    #[inline]
    pub fn light(&self) -> Vec2 {
        Vec2::new(self.light_x, self.light_y)
    }
}
