//! CPU side of the frame renderer.
//!
//! [`Canvas`] turns draw requests into a [`DrawQueue`], applying the camera,
//! parallax, screen shake, flip, rotation and grayscale blend as it goes. The
//! queue is plain data; the GPU renderer only projects and rasterizes it.

mod queue;
mod request;

pub use queue::{DrawCall, DrawQueue, DrawSource, DrawTransform, Vertex, QUAD_INDICES, QUAD_UVS};
pub use request::{BatchRequest, SpriteRequest};

use glam::Vec2;

use crate::coords::{Bounds, Viewport};
use crate::effects::{resolve_depth_offset, Camera, Effects};
use crate::paint::ColorEffect;
use crate::shadow::ShadowPolygon;

/// Most quads one batch call holds; 4 vertices each must stay `u16`-indexable.
pub const MAX_BATCH_QUADS: usize = (u16::MAX as usize + 1) / 4;

/// Per-frame draw recorder plus the effect state draws read from.
#[derive(Debug, Clone)]
pub struct Canvas {
    viewport: Viewport,
    pub effects: Effects,
    queue: DrawQueue,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_effects(viewport, Effects::new())
    }

    pub fn with_effects(viewport: Viewport, effects: Effects) -> Self {
        Self { viewport, effects, queue: DrawQueue::new() }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn queue(&self) -> &DrawQueue {
        &self.queue
    }

    /// Empties the queue after a frame has been presented.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[inline]
    pub fn camera(&self) -> Camera {
        self.effects.camera
    }

    pub fn set_camera(&mut self, x: i32, y: i32) {
        self.effects.camera = Camera::new(x, y);
    }

    /// Sprite position after camera, parallax and shake.
    fn place(&self, (x, y): (i32, i32), depth: (i32, i32), camera_align: bool) -> (i32, i32) {
        let cam = self.effects.camera;
        let (shake_x, shake_y) = self.effects.shake.offset();
        let x = x
            .saturating_sub(resolve_depth_offset(cam.x, depth.0, camera_align))
            .saturating_add(shake_x);
        let y = y
            .saturating_add(resolve_depth_offset(cam.y, depth.1, camera_align))
            .saturating_add(shake_y);
        (x, y)
    }

    fn blend(&self, color: ColorEffect) -> ColorEffect {
        color.grayscaled(self.effects.grayscale.current())
    }

    /// Queues a sprite and, when it has one, its flat shadow underneath.
    pub fn draw_sprite(&mut self, req: &SpriteRequest<'_>) {
        let color = self.blend(req.color);
        let (x, y) = self.place(req.position, req.depth_effect, req.camera_align);

        let mut bounds = Bounds::from_position_size(x, y, req.size.0, req.size.1, req.scale);
        if req.flip_horizontally {
            bounds = bounds.flipped_horizontally();
        }

        let pivot = bounds.center();
        let transform = DrawTransform::new(self.viewport, pivot, req.rotation);

        if let Some(shadow) = req.flat_shadow
            && let Some(poly) = ShadowPolygon::build(bounds, pivot, shadow)
        {
            let indices = poly.fan_indices();
            let vertices = poly
                .vertices
                .iter()
                .map(|v| Vertex {
                    position: v.position,
                    uv: v.uv,
                    color: ColorEffect::new(255, 255, 255, v.alpha),
                })
                .collect();
            self.queue.push(DrawCall {
                source: DrawSource::Texture(shadow.image),
                transform,
                vertices,
                indices,
            });
        }

        self.queue.push(DrawCall {
            source: DrawSource::Texture(req.texture),
            transform,
            vertices: quad_vertices(bounds, pivot, color),
            indices: QUAD_INDICES.to_vec(),
        });
    }

    /// Queues every position of a batch, all sampling one texture.
    ///
    /// The tint is used as given: batches are not grayscale blended. Batches
    /// larger than [`MAX_BATCH_QUADS`] are split over several calls so every
    /// index fits in `u16`.
    pub fn draw_sprite_batch(&mut self, req: &BatchRequest<'_>) {
        for chunk in req.positions.chunks(MAX_BATCH_QUADS) {
            let mut vertices = Vec::with_capacity(chunk.len() * 4);
            let mut indices = Vec::with_capacity(chunk.len() * 6);

            for &position in chunk {
                let (x, y) = self.place(position, req.depth_effect, req.camera_align);
                let mut bounds =
                    Bounds::from_position_size(x, y, req.size.0, req.size.1, req.scale);
                if req.flip_horizontally {
                    bounds = bounds.flipped_horizontally();
                }

                let base = vertices.len() as u16;
                vertices.extend(quad_vertices(bounds, Vec2::ZERO, req.color));
                indices.extend(QUAD_INDICES.iter().map(|i| base + i));
            }

            self.queue.push(DrawCall {
                source: DrawSource::Texture(req.texture),
                transform: DrawTransform::new(self.viewport, Vec2::ZERO, 0.0),
                vertices,
                indices,
            });
        }
    }

    /// Queues a flat-color rectangle rotated about its center.
    ///
    /// Camera alignment shifts it like a sprite with no parallax; screen shake
    /// and grayscale do not apply.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        rotation: f32,
        color: ColorEffect,
        camera_align: bool,
    ) {
        let (mut x, mut y) = (x, y);
        if camera_align {
            x -= self.effects.camera.x;
            y += self.effects.camera.y;
        }

        let bounds = Bounds::from_position_size(x, y, width, height, 1.0);
        let pivot = bounds.center();
        self.queue.push(DrawCall {
            source: DrawSource::Solid,
            transform: DrawTransform::new(self.viewport, pivot, rotation),
            vertices: quad_vertices(bounds, pivot, color),
            indices: QUAD_INDICES.to_vec(),
        });
    }

    /// Queues an untinted, top-left anchored image of `width`×`height`.
    ///
    /// Used for rasterized text; camera and effects do not apply.
    pub fn draw_overlay(&mut self, source: DrawSource, x: i32, y: i32, width: u32, height: u32) {
        let bounds = Bounds::from_position_size(x, y, width as i32, height as i32, 1.0);
        let pivot = Vec2::new(bounds.x1, bounds.y1);
        self.queue.push(DrawCall {
            source,
            transform: DrawTransform::new(self.viewport, pivot, 0.0),
            vertices: quad_vertices(bounds, pivot, ColorEffect::WHITE),
            indices: QUAD_INDICES.to_vec(),
        });
    }
}

fn quad_vertices(bounds: Bounds, pivot: Vec2, color: ColorEffect) -> Vec<Vertex> {
    bounds
        .corners()
        .into_iter()
        .zip(QUAD_UVS)
        .map(|(corner, uv)| Vertex { position: corner - pivot, uv, color })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::FlatShadow;
    use crate::texture::TextureId;

    const SPRITE: TextureId = TextureId::from_index(0);
    const SHADOW: TextureId = TextureId::from_index(1);

    fn canvas() -> Canvas {
        Canvas::with_effects(Viewport::new(640.0, 480.0), Effects::with_seed(9))
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn screen_bounds(call: &DrawCall) -> (Vec2, Vec2) {
        let p = call.screen_positions();
        (p[0], p[2])
    }

    #[test]
    fn camera_with_parallax_divisor() {
        let mut c = canvas();
        c.set_camera(100, 0);
        c.draw_sprite(&SpriteRequest::new(SPRITE, (32, 32), (50, 50)).depth_effect(2, 0));

        let call = &c.queue().calls()[0];
        let (tl, br) = screen_bounds(call);
        assert!(close(tl, Vec2::new(0.0, 50.0)), "{tl}");
        assert!(close(br, Vec2::new(32.0, 82.0)), "{br}");
        assert_eq!(call.transform.pivot, Vec2::new(16.0, 66.0));
    }

    #[test]
    fn vertical_camera_offset_is_added() {
        let mut c = canvas();
        c.set_camera(0, 10);
        c.draw_sprite(&SpriteRequest::new(SPRITE, (8, 8), (0, 0)).camera_align(true));
        let (tl, _) = screen_bounds(&c.queue().calls()[0]);
        assert!(close(tl, Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn unaligned_sprite_ignores_camera() {
        let mut c = canvas();
        c.set_camera(100, 100);
        c.draw_sprite(&SpriteRequest::new(SPRITE, (8, 8), (5, 5)));
        let (tl, _) = screen_bounds(&c.queue().calls()[0]);
        assert!(close(tl, Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn flip_swaps_texture_edges_only() {
        let mut c = canvas();
        c.draw_sprite(&SpriteRequest::new(SPRITE, (32, 16), (10, 20)).flipped(true));
        let call = &c.queue().calls()[0];
        let p = call.screen_positions();
        // uv (0,0) now sits on the right edge.
        assert_eq!(call.vertices[0].uv, Vec2::ZERO);
        assert!(close(p[0], Vec2::new(42.0, 20.0)));
        assert!(close(p[1], Vec2::new(10.0, 20.0)));
        assert!(close(p[2], Vec2::new(10.0, 36.0)));
    }

    #[test]
    fn rotation_keeps_the_center_fixed() {
        let mut c = canvas();
        c.draw_sprite(&SpriteRequest::new(SPRITE, (20, 10), (0, 0)).rotation(90.0));
        let call = &c.queue().calls()[0];
        let center = Vec2::new(10.0, 5.0);
        assert_eq!(call.transform.pivot, center);
        let p = call.screen_positions();
        let mid = (p[0] + p[2]) * 0.5;
        assert!(close(mid, center));
        // Width and height trade places.
        assert!(((p[0] - p[1]).length() - 20.0).abs() < 1e-3);
        assert!(((p[0] - p[1]).x).abs() < 1e-3);
    }

    #[test]
    fn grayscale_blends_sprite_color() {
        let mut c = canvas();
        c.effects.grayscale.set(0.0, 1.0);
        c.draw_sprite(&SpriteRequest::new(SPRITE, (1, 1), (0, 0)).color(ColorEffect::new(
            255, 0, 0, 200,
        )));
        let color = c.queue().calls()[0].vertices[0].color;
        assert_eq!(color, ColorEffect::new(85, 85, 85, 200));
    }

    #[test]
    fn shake_offsets_sprites_while_active() {
        let mut c = canvas();
        c.effects.shake_screen(5, 10);
        c.effects.tick();
        let (dx, dy) = c.effects.shake.offset();
        c.draw_sprite(&SpriteRequest::new(SPRITE, (4, 4), (100, 100)));
        let (tl, _) = screen_bounds(&c.queue().calls()[0]);
        assert!(close(tl, Vec2::new((100 + dx) as f32, (100 + dy) as f32)));
        assert!((0..5).contains(&dx) && (0..5).contains(&dy));
    }

    fn right_shadow() -> FlatShadow {
        let mut s = FlatShadow::new(SHADOW, 200.0, 0.0, 0.5).with_alpha(180, 0);
        s.points_right = vec![Vec2::ZERO, Vec2::ZERO];
        s
    }

    #[test]
    fn shadow_is_queued_before_the_sprite() {
        let mut c = canvas();
        let shadow = right_shadow();
        c.draw_sprite(&SpriteRequest::new(SPRITE, (32, 32), (210, 50)).flat_shadow(&shadow));

        let calls = c.queue().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].source, DrawSource::Texture(SHADOW));
        assert_eq!(calls[1].source, DrawSource::Texture(SPRITE));

        let p = calls[0].screen_positions();
        // Silhouette edge sits on the sprite, opaque.
        assert!(close(p[0], Vec2::new(242.0, 50.0)));
        assert_eq!(calls[0].vertices[0].color, ColorEffect::new(255, 255, 255, 180));
        // Far edge recedes from the light, transparent.
        assert!(p[1].x > 242.0);
        assert_eq!(calls[0].vertices[1].color.alpha, 0);
        assert!(close(p[3], Vec2::new(210.0, 82.0)));
    }

    #[test]
    fn shadow_rotates_with_the_sprite() {
        let mut c = canvas();
        let shadow = right_shadow();
        c.draw_sprite(
            &SpriteRequest::new(SPRITE, (32, 32), (210, 50)).rotation(30.0).flat_shadow(&shadow),
        );
        let calls = c.queue().calls();
        assert_eq!(calls[0].transform, calls[1].transform);
    }

    #[test]
    fn shadow_without_light_is_skipped() {
        let mut c = canvas();
        let mut shadow = right_shadow();
        shadow.light_x = 0.0;
        c.draw_sprite(&SpriteRequest::new(SPRITE, (32, 32), (210, 50)).flat_shadow(&shadow));
        assert_eq!(c.queue().len(), 1);
    }

    #[test]
    fn batch_is_one_unrotated_call() {
        let mut c = canvas();
        c.set_camera(10, 0);
        let positions = [(0, 0), (50, 0), (100, 20)];
        let rotations = [45.0, 90.0, 180.0];
        c.draw_sprite_batch(
            &BatchRequest::new(SPRITE, (10, 10), &positions)
                .rotations(&rotations)
                .camera_align(true),
        );

        let calls = c.queue().calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.transform.rotation_degrees, 0.0);
        assert_eq!(call.vertices.len(), 12);
        assert_eq!(&call.indices[6..12], &[4, 5, 6, 4, 6, 7]);

        let p = call.screen_positions();
        assert!(close(p[4], Vec2::new(40.0, 0.0)));
        assert!(close(p[10], Vec2::new(100.0, 30.0)));
    }

    #[test]
    fn empty_batch_queues_nothing() {
        let mut c = canvas();
        c.draw_sprite_batch(&BatchRequest::new(SPRITE, (10, 10), &[]));
        assert!(c.queue().is_empty());
    }

    #[test]
    fn oversized_batch_is_split_into_indexable_calls() {
        let mut c = canvas();
        let positions: Vec<(i32, i32)> = (0..MAX_BATCH_QUADS as i32 + 1).map(|i| (i, 0)).collect();
        c.draw_sprite_batch(&BatchRequest::new(SPRITE, (1, 1), &positions));

        let calls = c.queue().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].vertices.len(), 65_536);
        assert_eq!(calls[0].indices.iter().max(), Some(&u16::MAX));
        assert_eq!(calls[1].source, DrawSource::Texture(SPRITE));
        assert_eq!(calls[1].vertices.len(), 4);
        assert_eq!(calls[1].indices, QUAD_INDICES.to_vec());

        let p = calls[1].screen_positions();
        assert!(close(p[0], Vec2::new(MAX_BATCH_QUADS as f32, 0.0)), "{}", p[0]);
    }

    #[test]
    fn batch_color_is_not_grayscale_blended() {
        let mut c = canvas();
        c.effects.grayscale.set(0.0, 1.0);
        assert_eq!(c.effects.grayscale.current(), 0.0);

        let red = ColorEffect::new(255, 0, 0, 200);
        c.draw_sprite_batch(&BatchRequest::new(SPRITE, (1, 1), &[(0, 0), (4, 4)]).color(red));
        for v in &c.queue().calls()[0].vertices {
            assert_eq!(v.color, red);
        }
    }

    #[test]
    fn batch_flips_and_shakes_every_quad() {
        let mut c = canvas();
        c.effects.shake_screen(5, 10);
        c.effects.tick();
        let (dx, dy) = c.effects.shake.offset();

        c.draw_sprite_batch(
            &BatchRequest::new(SPRITE, (8, 4), &[(10, 20), (40, 20)]).flipped(true),
        );
        let call = &c.queue().calls()[0];
        let p = call.screen_positions();
        let (dx, dy) = (dx as f32, dy as f32);

        // uv (0,0) sits on the right edge of each quad.
        assert_eq!(call.vertices[0].uv, Vec2::ZERO);
        assert!(close(p[0], Vec2::new(18.0 + dx, 20.0 + dy)));
        assert!(close(p[1], Vec2::new(10.0 + dx, 20.0 + dy)));
        assert!(close(p[2], Vec2::new(10.0 + dx, 24.0 + dy)));
        assert!(close(p[4], Vec2::new(48.0 + dx, 20.0 + dy)));
        assert!(close(p[5], Vec2::new(40.0 + dx, 20.0 + dy)));
    }

    #[test]
    fn rectangle_rotates_about_its_center() {
        let mut c = canvas();
        c.draw_rectangle(10, 10, 20, 10, 90.0, ColorEffect::WHITE, false);

        let call = &c.queue().calls()[0];
        let center = Bounds::from_position_size(10, 10, 20, 10, 1.0).center();
        assert_eq!(call.transform.pivot, center);
        assert_eq!(center, Vec2::new(20.0, 15.0));

        let p = call.screen_positions();
        assert!(close((p[0] + p[2]) * 0.5, center));
        assert!(close((p[1] + p[3]) * 0.5, center));
        // The 20 px top edge now runs vertically.
        assert!(((p[0] - p[1]).length() - 20.0).abs() < 1e-3);
        assert!((p[0] - p[1]).x.abs() < 1e-3);
    }

    #[test]
    fn extreme_camera_offsets_saturate() {
        let mut c = canvas();
        c.set_camera(i32::MAX, i32::MAX);
        c.draw_sprite(&SpriteRequest::new(SPRITE, (1, 1), (-10, 10)).depth_effect(-3, -3));

        let pivot = c.queue().calls()[0].transform.pivot;
        assert_eq!(pivot.x, i32::MIN as f32);
        assert_eq!(pivot.y, i32::MAX as f32);
    }

    #[test]
    fn rectangle_aligns_to_camera_without_shake() {
        let mut c = canvas();
        c.set_camera(5, 7);
        c.effects.shake_screen(50, 10);
        c.effects.tick();
        c.draw_rectangle(10, 10, 20, 10, 0.0, ColorEffect::new(1, 2, 3, 4), true);

        let call = &c.queue().calls()[0];
        assert_eq!(call.source, DrawSource::Solid);
        let (tl, br) = screen_bounds(call);
        assert!(close(tl, Vec2::new(5.0, 17.0)));
        assert!(close(br, Vec2::new(25.0, 27.0)));
        assert_eq!(call.vertices[0].color, ColorEffect::new(1, 2, 3, 4));
    }

    #[test]
    fn overlay_is_top_left_anchored_and_white() {
        let mut c = canvas();
        c.set_camera(100, 100);
        c.draw_overlay(DrawSource::Transient(0), 3, 4, 30, 12);
        let call = &c.queue().calls()[0];
        assert_eq!(call.transform.pivot, Vec2::new(3.0, 4.0));
        let (tl, br) = screen_bounds(call);
        assert!(close(tl, Vec2::new(3.0, 4.0)));
        assert!(close(br, Vec2::new(33.0, 16.0)));
        assert_eq!(call.vertices[0].color, ColorEffect::WHITE);
    }

    #[test]
    fn every_call_carries_the_configured_projection() {
        let mut c = canvas();
        c.draw_rectangle(0, 0, 1, 1, 0.0, ColorEffect::WHITE, false);
        c.draw_sprite(&SpriteRequest::new(SPRITE, (1, 1), (0, 0)));
        for call in c.queue().calls() {
            assert_eq!(call.transform.viewport, Viewport::new(640.0, 480.0));
        }
        c.clear();
        assert!(c.queue().is_empty());
    }
}
