use glam::{Mat4, Vec2};

use crate::coords::Viewport;
use crate::paint::ColorEffect;
use crate::texture::TextureId;

/// Indices of a quad whose corners are listed in [`Bounds::corners`] order.
///
/// [`Bounds::corners`]: crate::coords::Bounds::corners
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Texture coordinates matching the corner order of a quad.
pub const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// What a draw call samples.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawSource {
    /// A texture from the table.
    Texture(TextureId),
    /// Flat vertex color (sampled from a 1×1 white texture).
    Solid,
    /// A one-frame texture (rasterized text) by index into the frame's
    /// transient list.
    Transient(usize),
}

/// Per-call placement: projection, pivot and rotation.
///
/// Every call carries its own projection, so nothing one draw does can leak
/// into the next.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawTransform {
    pub viewport: Viewport,
    /// Logical-pixel point the vertices are relative to.
    pub pivot: Vec2,
    /// Counter-clockwise on screen, in degrees.
    pub rotation_degrees: f32,
}

impl DrawTransform {
    pub fn new(viewport: Viewport, pivot: Vec2, rotation_degrees: f32) -> Self {
        Self { viewport, pivot, rotation_degrees }
    }

    /// Pivot-local space to logical pixels.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.pivot.extend(0.0))
            * Mat4::from_rotation_z((-self.rotation_degrees).to_radians())
    }

    /// Pivot-local space to clip space.
    pub fn matrix(&self) -> Mat4 {
        self.viewport.projection() * self.model()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    /// Relative to the call's pivot.
    pub position: Vec2,
    pub uv: Vec2,
    pub color: ColorEffect,
}

/// One textured, alpha-blended triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub source: DrawSource,
    pub transform: DrawTransform,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl DrawCall {
    /// Vertex positions in logical pixels, rotation applied.
    pub fn screen_positions(&self) -> Vec<Vec2> {
        let model = self.transform.model();
        self.vertices
            .iter()
            .map(|v| model.transform_point3(v.position.extend(0.0)).truncate())
            .collect()
    }
}

/// Draw calls of one frame, back to front.
#[derive(Debug, Default, Clone)]
pub struct DrawQueue {
    calls: Vec<DrawCall>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: DrawCall) {
        if call.indices.is_empty() {
            return;
        }
        self.calls.push(call);
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    fn quad(pivot: Vec2, rotation: f32) -> DrawCall {
        let half = Vec2::new(10.0, 5.0);
        let corners = [-half, Vec2::new(half.x, -half.y), half, Vec2::new(-half.x, half.y)];
        DrawCall {
            source: DrawSource::Solid,
            transform: DrawTransform::new(Viewport::new(100.0, 100.0), pivot, rotation),
            vertices: corners
                .iter()
                .zip(QUAD_UVS)
                .map(|(p, uv)| Vertex { position: *p, uv, color: ColorEffect::WHITE })
                .collect(),
            indices: QUAD_INDICES.to_vec(),
        }
    }

    #[test]
    fn unrotated_call_translates_by_pivot() {
        let p = quad(Vec2::new(50.0, 50.0), 0.0).screen_positions();
        assert!(close(p[0], Vec2::new(40.0, 45.0)));
        assert!(close(p[2], Vec2::new(60.0, 55.0)));
    }

    #[test]
    fn rotation_turns_about_the_pivot() {
        let pivot = Vec2::new(50.0, 50.0);
        let p = quad(pivot, 90.0).screen_positions();
        // The pivot is fixed and distances are preserved.
        for v in &p {
            assert!(((*v - pivot).length() - Vec2::new(10.0, 5.0).length()).abs() < 1e-4);
        }
        // +Y is down: a -90° z-rotation maps local (10, -5) to (-5, -10).
        assert!(close(p[1], Vec2::new(45.0, 40.0)));
    }

    #[test]
    fn matrix_projects_with_the_call_viewport() {
        let call = quad(Vec2::new(50.0, 50.0), 0.0);
        let m = call.transform.matrix();
        let p = m.project_point3(call.vertices[0].position.extend(0.0)).truncate();
        assert!(close(p, Vec2::new(-0.2, 0.1)));
    }

    #[test]
    fn empty_calls_are_not_queued() {
        let mut q = DrawQueue::new();
        let mut call = quad(Vec2::ZERO, 0.0);
        call.indices.clear();
        q.push(call);
        assert!(q.is_empty());
    }
}
