use std::fmt;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::config::FontConfig;
use crate::texture::DecodedImage;

/// Error returned by [`FontSystem::load`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Coverage bitmap of one laid-out glyph.
#[derive(Debug, Clone)]
pub struct GlyphCoverage {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// The engine font: one face at one pixel size and color.
pub struct FontSystem {
    font: fontdue::Font,
    size: f32,
    color: [u8; 3],
}

impl FontSystem {
    /// Reads and parses the font file at `path`.
    pub fn load(path: impl AsRef<Path>, config: &FontConfig) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes, config)
    }

    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8], config: &FontConfig) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self {
            font,
            size: config.size.max(1) as f32,
            color: [config.red, config.green, config.blue],
        })
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Rasterizes `text` on a single line into an RGBA image.
    ///
    /// Every pixel carries the font color; glyph coverage becomes alpha. The
    /// image is at least 1×1 so a blank string still yields a drawable quad.
    pub fn rasterize_line(&self, text: &str) -> DecodedImage {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, self.size, 0));

        let mut advance_width = 0.0f32;
        let mut glyphs = Vec::new();
        for g in layout.glyphs() {
            let m = self.font.metrics_indexed(g.key.glyph_index, self.size);
            advance_width = advance_width.max(g.x - m.xmin as f32 + m.advance_width);

            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, coverage) = self.font.rasterize_config(g.key);
            glyphs.push(GlyphCoverage {
                x: g.x.round() as i32,
                y: g.y.round() as i32,
                width: metrics.width,
                height: metrics.height,
                coverage,
            });
        }

        let width = advance_width.ceil().max(1.0) as u32;
        let height = layout.height().ceil().max(1.0) as u32;
        compose_line(&glyphs, width, height, self.color)
    }
}

/// Blits glyph coverage into a `width`×`height` RGBA image of `color`.
///
/// Overlapping glyphs keep the strongest coverage. Pixels outside the image
/// are clipped.
pub(crate) fn compose_line(
    glyphs: &[GlyphCoverage],
    width: u32,
    height: u32,
    color: [u8; 3],
) -> DecodedImage {
    let (w, h) = (width.max(1) as usize, height.max(1) as usize);
    let mut pixels = Vec::with_capacity(w * h * 4);
    for _ in 0..w * h {
        pixels.extend_from_slice(&[color[0], color[1], color[2], 0]);
    }

    for g in glyphs {
        for row in 0..g.height {
            let py = g.y + row as i32;
            if py < 0 || py as usize >= h {
                continue;
            }
            for col in 0..g.width {
                let px = g.x + col as i32;
                if px < 0 || px as usize >= w {
                    continue;
                }
                let a = g.coverage[row * g.width + col];
                let idx = (py as usize * w + px as usize) * 4 + 3;
                pixels[idx] = pixels[idx].max(a);
            }
        }
    }

    DecodedImage {
        pixels,
        width: w as u32,
        height: h as u32,
        layout: crate::texture::ChannelLayout::Rgba,
        warning: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(img: &DecodedImage, x: usize, y: usize) -> u8 {
        img.pixels[(y * img.width as usize + x) * 4 + 3]
    }

    #[test]
    fn compose_writes_color_and_coverage() {
        let glyph = GlyphCoverage { x: 1, y: 0, width: 2, height: 1, coverage: vec![128, 255] };
        let img = compose_line(&[glyph], 4, 2, [10, 20, 30]);
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(&img.pixels[..4], &[10, 20, 30, 0]);
        assert_eq!(alpha_at(&img, 1, 0), 128);
        assert_eq!(alpha_at(&img, 2, 0), 255);
        assert_eq!(alpha_at(&img, 1, 1), 0);
    }

    #[test]
    fn compose_clips_out_of_bounds_glyphs() {
        let glyph = GlyphCoverage { x: -1, y: 1, width: 3, height: 2, coverage: vec![9; 6] };
        let img = compose_line(&[glyph], 2, 2, [0, 0, 0]);
        assert_eq!(alpha_at(&img, 0, 1), 9);
        assert_eq!(alpha_at(&img, 1, 1), 9);
        assert_eq!(alpha_at(&img, 0, 0), 0);
    }

    #[test]
    fn overlapping_glyphs_keep_max_coverage() {
        let a = GlyphCoverage { x: 0, y: 0, width: 1, height: 1, coverage: vec![200] };
        let b = GlyphCoverage { x: 0, y: 0, width: 1, height: 1, coverage: vec![50] };
        let img = compose_line(&[a, b], 1, 1, [0, 0, 0]);
        assert_eq!(alpha_at(&img, 0, 0), 200);
    }

    #[test]
    fn empty_line_is_one_transparent_pixel() {
        let img = compose_line(&[], 0, 0, [1, 2, 3]);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.pixels, vec![1, 2, 3, 0]);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let err = FontSystem::from_bytes(b"not a font", &FontConfig::default()).err();
        assert!(err.is_some());
    }

    #[test]
    fn missing_font_file_names_the_path() {
        let path = std::env::temp_dir().join("rosalila-no-such-font.ttf");
        let err = FontSystem::load(&path, &FontConfig::default()).err().unwrap();
        assert!(err.to_string().contains("rosalila-no-such-font.ttf"));
    }
}
