use std::path::Path;

use crate::error::EngineError;
use crate::render::{RenderCtx, RenderTarget, TextureSet};

use super::Graphics;

impl Graphics<'_> {
    /// Saves a `width`×`height` region of the current frame to `path` as an
    /// uncompressed 32-bit BMP.
    ///
    /// `(x, y)` is the top-left corner in surface pixels. The frame is the
    /// draw queue as it stands, rendered offscreen over black; the queue is
    /// left untouched for the following [`present_frame`](Self::present_frame).
    /// Blocks until the GPU has finished the copy.
    pub fn screenshot(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        path: impl AsRef<Path>,
    ) -> Result<(), EngineError> {
        let size = self.gpu.size();
        check_region(x, y, width, height, size.width, size.height)?;

        let format = self.gpu.surface_format();
        let device = self.gpu.device();
        let queue = self.gpu.queue();

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("rosalila screenshot target"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        let unpadded_bytes_per_row = width * 4;
        let padded_bytes_per_row = padded_row_bytes(width);
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rosalila screenshot readback"),
            size: u64::from(padded_bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("rosalila screenshot encoder"),
        });

        {
            let ctx = RenderCtx::new(device, queue, format);
            let textures = TextureSet { table: &self.textures, transient: &self.transient };
            let mut pass_target = RenderTarget::new(&mut encoder, &view);
            self.renderer.render(
                &ctx,
                &mut pass_target,
                self.canvas.queue(),
                &textures,
                Some(wgpu::Color::BLACK),
            );
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );

        let submission = queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::Wait { submission_index: Some(submission), timeout: None })
            .map_err(|e| EngineError::Capture(format!("device poll failed: {e}")))?;
        rx.recv()
            .map_err(|_| EngineError::Capture("readback was never mapped".into()))?
            .map_err(|e| EngineError::Capture(format!("readback map failed: {e}")))?;

        let pixels = {
            let mapped = slice.get_mapped_range();
            unpad_rows(&mapped, padded_bytes_per_row, unpadded_bytes_per_row, height)
        };
        readback.unmap();

        let bgra = to_bgra(pixels, format)?;
        write_bitmap(&bgra, width, height, path.as_ref())?;
        log::info!("screenshot saved to {}", path.as_ref().display());
        Ok(())
    }
}

fn check_region(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    surface_width: u32,
    surface_height: u32,
) -> Result<(), EngineError> {
    let fits = width > 0
        && height > 0
        && x.checked_add(width).is_some_and(|r| r <= surface_width)
        && y.checked_add(height).is_some_and(|b| b <= surface_height);
    if fits {
        Ok(())
    } else {
        Err(EngineError::Capture(format!(
            "region {width}x{height} at ({x}, {y}) is outside the {surface_width}x{surface_height} surface"
        )))
    }
}

/// Bytes per row of a texture copy, rounded up to wgpu's row alignment.
fn padded_row_bytes(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

fn unpad_rows(data: &[u8], padded: u32, unpadded: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((unpadded * height) as usize);
    for row in 0..height as usize {
        let start = row * padded as usize;
        out.extend_from_slice(&data[start..start + unpadded as usize]);
    }
    out
}

/// Reorders 4-byte pixels in `format` to BGRA.
fn to_bgra(mut pixels: Vec<u8>, format: wgpu::TextureFormat) -> Result<Vec<u8>, EngineError> {
    use wgpu::TextureFormat as F;
    match format {
        F::Bgra8Unorm | F::Bgra8UnormSrgb => Ok(pixels),
        F::Rgba8Unorm | F::Rgba8UnormSrgb => {
            for px in pixels.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            Ok(pixels)
        }
        other => Err(EngineError::Capture(format!("cannot read back {other:?} surfaces"))),
    }
}

/// Writes tightly packed BGRA pixels (top row first) as a 32-bit BMP.
pub fn write_bitmap(bgra: &[u8], width: u32, height: u32, path: &Path) -> Result<(), EngineError> {
    if bgra.len() != (width as usize) * (height as usize) * 4 {
        return Err(EngineError::Capture(format!(
            "{} bytes do not form a {width}x{height} image",
            bgra.len()
        )));
    }

    let mut rgba = bgra.to_vec();
    for px in rgba.chunks_exact_mut(4) {
        px.swap(0, 2);
    }

    image::save_buffer_with_format(
        path,
        &rgba,
        width,
        height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Bmp,
    )
    .map_err(|e| EngineError::Capture(format!("{}: {e}", path.display())))
}
