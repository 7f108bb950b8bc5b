use std::path::Path;

use image::ColorType;

use crate::error::EngineError;

/// Channel layout of the source image before RGBA expansion.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChannelLayout {
    Rgb,
    Rgba,
}

/// CPU-side image ready for upload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Tightly packed RGBA8 rows, top row first.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    /// Set when the source was not 8-bit RGB/RGBA and had to be converted.
    pub warning: Option<EngineError>,
}

impl DecodedImage {
    /// Wraps already-packed RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
        if pixels.len() != expected || width == 0 || height == 0 {
            return None;
        }
        Some(Self { pixels, width, height, layout: ChannelLayout::Rgba, warning: None })
    }
}

/// Decodes the image at `path`.
///
/// Fails with [`EngineError::Decode`] when the file cannot be read or parsed.
/// Images that are not 8-bit RGB or RGBA still decode; they carry an
/// [`EngineError::UnsupportedFormat`] warning for the caller to report.
pub fn decode_image(path: impl AsRef<Path>) -> Result<DecodedImage, EngineError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let color = img.color();
    let (layout, warning) = match color {
        ColorType::Rgb8 => (ChannelLayout::Rgb, None),
        ColorType::Rgba8 => (ChannelLayout::Rgba, None),
        other => (
            ChannelLayout::Rgba,
            Some(EngineError::UnsupportedFormat {
                path: path.to_path_buf(),
                color: format!("{other:?}"),
            }),
        ),
    };

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {} ({width}x{height}, {color:?})", path.display());

    Ok(DecodedImage { pixels: rgba.into_raw(), width, height, layout, warning })
}
