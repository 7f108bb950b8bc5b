use glam::Mat4;

/// Logical screen size a draw call projects to.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Orthographic projection with a top-left origin and +Y down:
    /// `(0, 0)` maps to clip `(-1, 1)`, `(width, height)` to `(1, -1)`.
    pub fn projection(self) -> Mat4 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn to_clip(vp: Viewport, p: Vec2) -> Vec2 {
        vp.projection().project_point3(p.extend(0.0)).truncate()
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn corners_map_to_clip_corners() {
        let vp = Viewport::new(640.0, 480.0);
        assert!(close(to_clip(vp, Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0)));
        assert!(close(to_clip(vp, Vec2::new(640.0, 480.0)), Vec2::new(1.0, -1.0)));
        assert!(close(to_clip(vp, Vec2::new(320.0, 240.0)), Vec2::ZERO));
    }

    #[test]
    fn degenerate_size_still_projects() {
        let p = to_clip(Viewport::new(0.0, 0.0), Vec2::ZERO);
        assert!(p.is_finite());
    }
}
