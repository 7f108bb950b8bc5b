//! Camera and per-frame screen effects.
//!
//! All state here is owned by the render thread. Effects advance exactly once
//! per presented frame through [`Effects::tick`].

mod camera;
mod depth;
mod grayscale;
mod rng;
mod shake;

pub use camera::Camera;
pub use depth::resolve_depth_offset;
pub use grayscale::Grayscale;
pub use rng::JitterRng;
pub use shake::ScreenShake;

/// Camera plus the two animated effects and the jitter source they share.
#[derive(Debug, Clone)]
pub struct Effects {
    pub camera: Camera,
    pub shake: ScreenShake,
    pub grayscale: Grayscale,
    rng: JitterRng,
}

impl Default for Effects {
    fn default() -> Self {
        Self::with_seed(JitterRng::DEFAULT_SEED)
    }
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects with a specific jitter seed (deterministic shakes in tests/replays).
    pub fn with_seed(seed: u32) -> Self {
        Self {
            camera: Camera::default(),
            shake: ScreenShake::default(),
            grayscale: Grayscale::default(),
            rng: JitterRng::new(seed),
        }
    }

    /// Starts or restarts a screen shake, remembering the current camera.
    pub fn shake_screen(&mut self, magnitude: i32, duration_frames: u32) {
        self.shake.start(magnitude, duration_frames, self.camera);
    }

    /// Advances shake and grayscale by one frame.
    pub fn tick(&mut self) {
        self.shake.tick(&mut self.rng);
        self.grayscale.tick();
    }
}
