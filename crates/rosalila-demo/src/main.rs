use anyhow::{Context, Result};
use glam::Vec2;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use rosalila_engine::canvas::{BatchRequest, SpriteRequest};
use rosalila_engine::config::EngineConfig;
use rosalila_engine::core::{App, AppControl, FrameCtx};
use rosalila_engine::logging::{init_logging, LoggingConfig};
use rosalila_engine::paint::ColorEffect;
use rosalila_engine::shadow::FlatShadow;
use rosalila_engine::texture::TextureId;
use rosalila_engine::window::{Runtime, RuntimeConfig};
use rosalila_engine::Graphics;

const DEFAULT_CONFIG: &str = "assets/config.json";
const SPRITE_SIZE: u32 = 48;
const TILE_SIZE: u32 = 32;

fn main() {
    init_logging(LoggingConfig::default());

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e:#}; using built-in 640x480 configuration");
            EngineConfig::new(640, 480)
        }
    };

    let result = Runtime::run(RuntimeConfig::new("rosalila demo", config), Demo::default());
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn load_config() -> Result<EngineConfig> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = EngineConfig::load(&path).with_context(|| format!("reading {path}"))?;
    Ok(config)
}

// ── generated art ─────────────────────────────────────────────────────────

fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let even = (x / cell + y / cell) % 2 == 0;
            pixels.extend_from_slice(if even { &a } else { &b });
        }
    }
    pixels
}

/// Opaque disc on a transparent background.
fn disc(size: u32, color: [u8; 3]) -> Vec<u8> {
    let r = size as f32 / 2.0;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let d = Vec2::new(x as f32 + 0.5 - r, y as f32 + 0.5 - r).length();
            let alpha = if d <= r { 255 } else { 0 };
            pixels.extend_from_slice(&[color[0], color[1], color[2], alpha]);
        }
    }
    pixels
}

// ── demo ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Demo {
    hero: Option<TextureId>,
    tile: Option<TextureId>,
    shadow: Option<FlatShadow>,
    tiles: Vec<(i32, i32)>,

    camera_x: i32,
    camera_step: i32,
    gray: bool,
    gray_changed: bool,
    shake_requested: bool,
    screenshot_requested: bool,
}

impl Demo {
    fn on_key(&mut self, code: KeyCode) -> AppControl {
        match code {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::Space => self.shake_requested = true,
            KeyCode::KeyG => {
                self.gray = !self.gray;
                self.gray_changed = true;
            }
            KeyCode::KeyP => self.screenshot_requested = true,
            KeyCode::ArrowLeft => self.camera_step = -4,
            KeyCode::ArrowRight => self.camera_step = 4,
            _ => {}
        }
        AppControl::Continue
    }
}

impl App for Demo {
    fn on_start(&mut self, gfx: &mut Graphics<'_>) -> AppControl {
        let hero = gfx.load_texture_from_rgba(
            "hero",
            SPRITE_SIZE,
            SPRITE_SIZE,
            checkerboard(SPRITE_SIZE, 8, [220, 60, 60, 255], [240, 200, 80, 255]),
        );
        let tile = gfx.load_texture_from_rgba(
            "tile",
            TILE_SIZE,
            TILE_SIZE,
            checkerboard(TILE_SIZE, 16, [40, 90, 40, 255], [50, 110, 50, 255]),
        );
        let shade = gfx.load_texture_from_rgba("shade", 16, 16, disc(16, [0, 0, 0]));

        // Anything under assets/ is optional; the generated art stands in.
        if let Some(id) = gfx.load_texture("hero", "assets/hero.png") {
            log::info!("using hero texture from disk ({:?})", gfx.texture(id));
        }

        self.hero = hero;
        self.tile = tile;
        self.shadow = shade.map(|image| {
            let mut shadow = FlatShadow::new(image, 160.0, 120.0, 0.6).with_alpha(160, 0);
            shadow.points_right = vec![Vec2::ZERO, Vec2::ZERO];
            shadow.points_left = vec![Vec2::ZERO, Vec2::ZERO];
            shadow.points_top = vec![Vec2::ZERO, Vec2::ZERO];
            shadow
        });

        self.tiles = (0..20)
            .flat_map(|x| (0..3).map(move |y| (x * TILE_SIZE as i32, 380 + y * TILE_SIZE as i32)))
            .collect();

        AppControl::Continue
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        match (event.state, event.physical_key) {
            (ElementState::Pressed, PhysicalKey::Code(code)) => self.on_key(code),
            (ElementState::Released, PhysicalKey::Code(KeyCode::ArrowLeft | KeyCode::ArrowRight)) => {
                self.camera_step = 0;
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let gfx = &mut *ctx.gfx;

        if std::mem::take(&mut self.shake_requested) {
            gfx.shake_screen(6, 20);
        }
        if std::mem::take(&mut self.gray_changed) {
            gfx.set_grayscale(if self.gray { 0.0 } else { 1.0 }, 0.05);
        }

        self.camera_x += self.camera_step;
        gfx.set_camera(self.camera_x, 0);

        if let Some(tile) = self.tile {
            gfx.draw_sprite_batch(
                &BatchRequest::new(tile, (TILE_SIZE as i32, TILE_SIZE as i32), &self.tiles)
                    .camera_align(true),
            );
        }

        gfx.draw_rectangle(20, 20, 120, 40, 0.0, ColorEffect::new(20, 20, 60, 180), false);
        gfx.draw_rectangle(
            480,
            60,
            40,
            40,
            ctx.frame as f32 * 2.0,
            ColorEffect::new(80, 160, 255, 255),
            true,
        );

        if let Some(hero) = self.hero {
            let size = (SPRITE_SIZE as i32, SPRITE_SIZE as i32);
            let mut sprite = SpriteRequest::new(hero, size, (260, 300))
                .rotation((ctx.frame as f32 * 0.5).sin() * 10.0)
                .flipped(self.camera_step < 0)
                .camera_align(true);
            if let Some(shadow) = self.shadow.as_ref() {
                sprite = sprite.flat_shadow(shadow);
            }
            gfx.draw_sprite(&sprite);

            // Far layer: moves at half the camera speed.
            gfx.draw_sprite(
                &SpriteRequest::new(hero, size, (420, 200))
                    .scale(0.5)
                    .depth_effect(2, 0)
                    .color(ColorEffect::new(120, 120, 255, 200)),
            );
        }

        gfx.draw_text(&format!("frame {}", ctx.frame), 28, 28);
        gfx.draw_text("space: shake  g: gray  p: screenshot  arrows: camera", 28, 44);

        if std::mem::take(&mut self.screenshot_requested) {
            let path = format!("screenshot-{}.bmp", ctx.frame);
            let size = gfx.window().inner_size();
            match gfx.screenshot(0, 0, size.width, size.height, &path) {
                Ok(()) => log::info!("saved {path}"),
                Err(e) => log::warn!("{e}"),
            }
        }

        AppControl::Continue
    }
}
