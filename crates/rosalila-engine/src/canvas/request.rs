use crate::paint::ColorEffect;
use crate::shadow::FlatShadow;
use crate::texture::TextureId;

/// Everything needed to draw one sprite.
///
/// Built with [`SpriteRequest::new`] and the chainable setters; unset fields
/// draw an unscaled, unrotated, untinted sprite that ignores the camera.
#[derive(Debug, Clone)]
pub struct SpriteRequest<'a> {
    pub texture: TextureId,
    /// Logical size before scaling.
    pub size: (i32, i32),
    pub position: (i32, i32),
    pub scale: f32,
    /// Degrees, counter-clockwise on screen.
    pub rotation: f32,
    pub flip_horizontally: bool,
    /// Parallax divisors `(x, y)`; see [`resolve_depth_offset`].
    ///
    /// [`resolve_depth_offset`]: crate::effects::resolve_depth_offset
    pub depth_effect: (i32, i32),
    pub color: ColorEffect,
    /// Accepted for compatibility with older callers; has no effect.
    pub shadow_offset: (i32, i32),
    pub camera_align: bool,
    pub flat_shadow: Option<&'a FlatShadow>,
}

impl<'a> SpriteRequest<'a> {
    pub fn new(texture: TextureId, size: (i32, i32), position: (i32, i32)) -> Self {
        Self {
            texture,
            size,
            position,
            scale: 1.0,
            rotation: 0.0,
            flip_horizontally: false,
            depth_effect: (0, 0),
            color: ColorEffect::WHITE,
            shadow_offset: (0, 0),
            camera_align: false,
            flat_shadow: None,
        }
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip_horizontally = flip;
        self
    }

    pub fn depth_effect(mut self, x: i32, y: i32) -> Self {
        self.depth_effect = (x, y);
        self
    }

    pub fn color(mut self, color: ColorEffect) -> Self {
        self.color = color;
        self
    }

    pub fn camera_align(mut self, align: bool) -> Self {
        self.camera_align = align;
        self
    }

    pub fn flat_shadow(mut self, shadow: &'a FlatShadow) -> Self {
        self.flat_shadow = Some(shadow);
        self
    }
}

/// Many copies of one texture drawn with a single bind.
///
/// `rotations` is accepted per position but batches are always drawn
/// unrotated.
#[derive(Debug, Clone)]
pub struct BatchRequest<'a> {
    pub texture: TextureId,
    pub size: (i32, i32),
    pub positions: &'a [(i32, i32)],
    pub rotations: &'a [f32],
    pub scale: f32,
    pub flip_horizontally: bool,
    pub depth_effect: (i32, i32),
    pub color: ColorEffect,
    pub camera_align: bool,
}

impl<'a> BatchRequest<'a> {
    pub fn new(texture: TextureId, size: (i32, i32), positions: &'a [(i32, i32)]) -> Self {
        Self {
            texture,
            size,
            positions,
            rotations: &[],
            scale: 1.0,
            flip_horizontally: false,
            depth_effect: (0, 0),
            color: ColorEffect::WHITE,
            camera_align: false,
        }
    }

    pub fn rotations(mut self, rotations: &'a [f32]) -> Self {
        self.rotations = rotations;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip_horizontally = flip;
        self
    }

    pub fn depth_effect(mut self, x: i32, y: i32) -> Self {
        self.depth_effect = (x, y);
        self
    }

    pub fn color(mut self, color: ColorEffect) -> Self {
        self.color = color;
        self
    }

    pub fn camera_align(mut self, align: bool) -> Self {
        self.camera_align = align;
        self
    }
}
