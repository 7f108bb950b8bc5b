use glam::Vec2;

use crate::coords::Bounds;

use super::FlatShadow;

/// Which side of the sprite the shadow falls on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShadowRegime {
    /// Sprite entirely right of the light.
    Right,
    /// Sprite entirely left of the light.
    Left,
    /// Light horizontally inside the sprite; the shadow falls upward.
    Top,
}

impl ShadowRegime {
    pub fn select(bounds: Bounds, light_x: f32) -> Self {
        if bounds.min_x() >= light_x {
            Self::Right
        } else if bounds.max_x() <= light_x {
            Self::Left
        } else {
            Self::Top
        }
    }
}

/// One shadow vertex, relative to the sprite pivot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowVertex {
    pub position: Vec2,
    pub uv: Vec2,
    pub alpha: u8,
}

/// Convex shadow outline in fan order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPolygon {
    pub regime: ShadowRegime,
    pub vertices: Vec<ShadowVertex>,
}

impl ShadowPolygon {
    /// Builds the shadow for a sprite occupying `bounds`.
    ///
    /// Vertices are expressed relative to `pivot`. Returns `None` when the
    /// light sits at the origin or the chosen side lacks two silhouette points.
    pub fn build(bounds: Bounds, pivot: Vec2, shadow: &FlatShadow) -> Option<Self> {
        if !shadow.has_light() {
            return None;
        }

        let regime = ShadowRegime::select(bounds, shadow.light_x);
        let anchors = match regime {
            ShadowRegime::Right => &shadow.points_right,
            ShadowRegime::Left => &shadow.points_left,
            ShadowRegime::Top => &shadow.points_top,
        };
        if anchors.len() < 2 {
            return None;
        }

        let Bounds { x1, y1, x2, y2 } = bounds;
        let light = shadow.light();
        let len = shadow.length;
        let near = shadow.alpha_init;
        let far = shadow.alpha_end;

        // Corner pushed away from the light by `length`.
        let cast = |corner: Vec2| corner + (corner - light) * len;
        let v = |position: Vec2, u: f32, v: f32, alpha: u8| ShadowVertex {
            position: position - pivot,
            uv: Vec2::new(u, v),
            alpha,
        };

        let mut vertices = Vec::with_capacity(4 + anchors.len());
        match regime {
            ShadowRegime::Right => {
                let base = Vec2::new(x1, y2) + anchors[0];
                vertices.push(v(Vec2::new(x2, y1) + anchors[1], 0.0, 0.0, near));
                vertices.push(v(cast(Vec2::new(x2, y1)), 1.0, 0.0, far));
                vertices.push(v(cast(Vec2::new(x1, y2)), 1.0, 1.0, far));
                vertices.push(v(base, 0.0, 1.0, near));
                for ib in &shadow.inbetween_points_right {
                    vertices.push(v(base + *ib, 0.0, 1.0, near));
                }
            }
            ShadowRegime::Left => {
                let base = Vec2::new(x1, y1) + anchors[0];
                vertices.push(v(cast(Vec2::new(x1, y1)), 0.0, 0.0, far));
                vertices.push(v(base, 1.0, 0.0, near));
                for ib in &shadow.inbetween_points_left {
                    vertices.push(v(base + *ib, 1.0, 0.0, near));
                }
                vertices.push(v(Vec2::new(x2, y2) + anchors[1], 1.0, 1.0, near));
                vertices.push(v(cast(Vec2::new(x2, y2)), 0.0, 1.0, far));
            }
            ShadowRegime::Top => {
                vertices.push(v(cast(Vec2::new(x1, y1)), 0.0, 0.0, far));
                vertices.push(v(Vec2::new(x1, y1) + anchors[0], 1.0, 0.0, near));
                vertices.push(v(Vec2::new(x2, y1) + anchors[1], 1.0, 1.0, near));
                vertices.push(v(cast(Vec2::new(x2, y1)), 0.0, 1.0, far));
            }
        }

        Some(Self { regime, vertices })
    }

    /// Fan triangulation around the first vertex.
    pub fn fan_indices(&self) -> Vec<u16> {
        let n = self.vertices.len() as u16;
        let mut out = Vec::with_capacity(self.vertices.len().saturating_sub(2) * 3);
        for i in 1..n.saturating_sub(1) {
            out.extend_from_slice(&[0, i, i + 1]);
        }
        out
    }
}
