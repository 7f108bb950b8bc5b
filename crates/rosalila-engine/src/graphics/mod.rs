//! The engine facade.
//!
//! [`Graphics`] owns the GPU context, the texture table, the font, the frame
//! canvas with its effect state and the frame pacer. Hosts call the draw
//! operations in back-to-front order and finish every frame with
//! [`Graphics::present_frame`].

mod present;
mod screenshot;

pub use screenshot::write_bitmap;

use std::path::Path;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::canvas::{BatchRequest, Canvas, DrawSource, SpriteRequest};
use crate::config::EngineConfig;
use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit};
use crate::effects::Camera;
use crate::error::EngineError;
use crate::logging::LineSink;
use crate::paint::ColorEffect;
use crate::render::SpriteRenderer;
use crate::text::FontSystem;
use crate::texture::{decode_image, DecodedImage, Texture, TextureId, TextureTable};
use crate::time::FramePacer;

/// Window-bound renderer with camera and screen effects.
pub struct Graphics<'w> {
    window: &'w Window,
    gpu: Gpu<'w>,
    renderer: SpriteRenderer,
    textures: TextureTable,
    /// Text textures drawn this frame; released after present.
    transient: Vec<Texture>,
    font: Option<FontSystem>,
    canvas: Canvas,
    pacer: FramePacer,
    sink: Box<dyn LineSink>,
}

impl<'w> Graphics<'w> {
    /// Creates the GPU context for `window` and loads the engine font.
    ///
    /// GPU failures are fatal ([`EngineError::Initialization`]). A missing or
    /// unreadable font is reported through `sink` and disables text drawing.
    pub fn new(
        window: &'w Window,
        config: &EngineConfig,
        init: GpuInit,
        sink: Box<dyn LineSink>,
    ) -> Result<Self, EngineError> {
        let gpu = pollster::block_on(Gpu::new(window, init))
            .map_err(|e| EngineError::Initialization(format!("{e:#}")))?;
        let renderer = SpriteRenderer::new(gpu.device(), gpu.queue());

        let font_path = config.font_path();
        let font = match FontSystem::load(&font_path, &config.font) {
            Ok(font) => Some(font),
            Err(e) => {
                sink.write_line(&format!("{e}; text drawing disabled"));
                None
            }
        };

        let viewport = Viewport::new(config.resolution.x as f32, config.resolution.y as f32);
        log::info!(
            "graphics ready: resolution {}x{}, surface {:?}",
            config.resolution.x,
            config.resolution.y,
            gpu.surface_format()
        );

        Ok(Self {
            window,
            gpu,
            renderer,
            textures: TextureTable::new(),
            transient: Vec::new(),
            font,
            canvas: Canvas::new(viewport),
            pacer: FramePacer::default(),
            sink,
        })
    }

    #[inline]
    pub fn window(&self) -> &'w Window {
        self.window
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Frames presented so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.pacer.frame()
    }

    /// Reconfigures the surface for a new window size. Logical resolution is
    /// unchanged; the frame is scaled to fit.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    // ── textures ───────────────────────────────────────────────────────────

    /// Decodes and uploads the image at `path` under `name`.
    ///
    /// Returns `None` (after reporting the error through the sink) when the
    /// file cannot be decoded.
    pub fn load_texture(&mut self, name: &str, path: impl AsRef<Path>) -> Option<TextureId> {
        let path = path.as_ref();
        let image = accept_decoded(self.sink.as_ref(), path, decode_image(path))?;
        Some(self.insert_texture(name, &image))
    }

    /// Uploads already-decoded RGBA8 pixels under `name`.
    ///
    /// Returns `None` when `pixels` does not hold `width * height * 4` bytes.
    pub fn load_texture_from_rgba(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Option<TextureId> {
        let Some(image) = DecodedImage::from_rgba(width, height, pixels) else {
            self.sink.write_line(&format!("{name}: pixel data does not match {width}x{height}"));
            return None;
        };
        Some(self.insert_texture(name, &image))
    }

    fn insert_texture(&mut self, name: &str, image: &DecodedImage) -> TextureId {
        let texture = self.renderer.upload(self.gpu.device(), self.gpu.queue(), image, name);
        self.textures.insert(name, texture)
    }

    /// Releases the texture registered under `name`.
    pub fn unload_texture(&mut self, name: &str) -> bool {
        self.textures.unload(name)
    }

    pub fn texture_id(&self, name: &str) -> Option<TextureId> {
        self.textures.id_of(name)
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id)
    }

    // ── camera & effects ───────────────────────────────────────────────────

    pub fn set_camera(&mut self, x: i32, y: i32) {
        self.canvas.set_camera(x, y);
    }

    pub fn camera(&self) -> Camera {
        self.canvas.camera()
    }

    /// Shakes every sprite by up to `magnitude` pixels for `duration_frames`
    /// presented frames. Restarts any running shake.
    pub fn shake_screen(&mut self, magnitude: i32, duration_frames: u32) {
        self.canvas.effects.shake_screen(magnitude, duration_frames);
    }

    /// Fades the saturation kept by every sprite toward `target` (1.0 = full
    /// color, 0.0 = gray) by `speed` per frame.
    pub fn set_grayscale(&mut self, target: f64, speed: f64) {
        self.canvas.effects.grayscale.set(target, speed);
    }

    pub fn grayscale(&self) -> f64 {
        self.canvas.effects.grayscale.current()
    }

    // ── drawing ────────────────────────────────────────────────────────────

    pub fn draw_sprite(&mut self, request: &SpriteRequest<'_>) {
        self.canvas.draw_sprite(request);
    }

    pub fn draw_sprite_batch(&mut self, request: &BatchRequest<'_>) {
        self.canvas.draw_sprite_batch(request);
    }

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
        self.canvas.draw_rectangle(x, y, width, height, rotation, color, camera_align);
    }

    /// Draws one line of text with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let Some(font) = self.font.as_ref() else { return; };
        let image = font.rasterize_line(if text.is_empty() { " " } else { text });

        let texture =
            self.renderer.upload(self.gpu.device(), self.gpu.queue(), &image, "rosalila text");
        let slot = self.transient.len();
        self.transient.push(texture);
        self.canvas.draw_overlay(DrawSource::Transient(slot), x, y, image.width, image.height);
    }
}

/// Reports the outcome of a decode through `sink` and passes the image on.
fn accept_decoded(
    sink: &dyn LineSink,
    path: &Path,
    result: Result<DecodedImage, EngineError>,
) -> Option<DecodedImage> {
    match result {
        Ok(image) => {
            if let Some(warning) = &image.warning {
                sink.write_line(&warning.to_string());
            }
            sink.write_line(&format!("{} loaded", path.display()));
            Some(image)
        }
        Err(e) => {
            sink.write_line(&e.to_string());
            None
        }
    }
}
