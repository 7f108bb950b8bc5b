use crate::device::SurfaceErrorAction;
use crate::error::EngineError;
use crate::render::{RenderCtx, RenderTarget, TextureSet};

use super::Graphics;

impl Graphics<'_> {
    /// Finishes the frame.
    ///
    /// In order: reports pending backend errors, sleeps out the frame period,
    /// advances shake and grayscale, then draws the queued calls over a black
    /// surface and presents. The draw queue and this frame's text textures are
    /// released whether or not the frame reached the screen.
    ///
    /// Only an unrecoverable surface error is returned.
    pub fn present_frame(&mut self) -> Result<(), EngineError> {
        for message in self.gpu.drain_platform_errors() {
            self.sink.write_line(&EngineError::TransientPlatform(message).to_string());
        }

        self.pacer.cap();
        self.canvas.effects.tick();

        let result = self.render_to_surface();
        self.canvas.clear();
        self.transient.clear();
        result
    }

    fn render_to_surface(&mut self) -> Result<(), EngineError> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let message = err.to_string();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(EngineError::Surface(message)),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("frame {} skipped: {message}", self.pacer.frame());
                        Ok(())
                    }
                };
            }
        };

        let ctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());
        let textures = TextureSet { table: &self.textures, transient: &self.transient };

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.renderer.render(
                &ctx,
                &mut target,
                self.canvas.queue(),
                &textures,
                Some(wgpu::Color::BLACK),
            );
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);
        Ok(())
    }
}
