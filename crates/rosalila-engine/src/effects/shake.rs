use super::{Camera, JitterRng};

/// Screen-shake animation.
///
/// The offset is nonzero only while frames remain; when the last frame is
/// consumed it is reset to `(0, 0)` once and stays there.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScreenShake {
    magnitude: i32,
    remaining: u32,
    origin_x: i32,
    origin_y: i32,
    offset_x: i32,
    offset_y: i32,
}

impl ScreenShake {
    /// Starts (or restarts) a shake of `magnitude` pixels for `frames` frames.
    ///
    /// The camera at the time of the call is stored as the shake origin. It is
    /// kept for callers that inspect it; the jitter itself does not use it.
    pub fn start(&mut self, magnitude: i32, frames: u32, camera: Camera) {
        self.magnitude = magnitude;
        self.remaining = frames;
        self.origin_x = camera.x;
        self.origin_y = camera.y;
    }

    /// Consumes one frame of the animation.
    pub fn tick(&mut self, rng: &mut JitterRng) {
        if self.remaining == 0 {
            return;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.offset_x = 0;
            self.offset_y = 0;
        } else {
            self.offset_x = rng.below(self.magnitude);
            self.offset_y = rng.below(self.magnitude);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// Current `(x, y)` pixel offset added to every sprite.
    #[inline]
    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Camera position captured by the last [`start`](Self::start).
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_shake_has_zero_offset() {
        let mut shake = ScreenShake::default();
        let mut rng = JitterRng::new(1);
        shake.tick(&mut rng);
        assert_eq!(shake.offset(), (0, 0));
        assert!(!shake.is_active());
    }

    #[test]
    fn offset_stays_below_magnitude_while_active() {
        let mut shake = ScreenShake::default();
        let mut rng = JitterRng::new(42);
        shake.start(6, 200, Camera::default());

        while shake.remaining() > 1 {
            shake.tick(&mut rng);
            let (x, y) = shake.offset();
            assert!((0..6).contains(&x), "x offset {x}");
            assert!((0..6).contains(&y), "y offset {y}");
        }
    }

    #[test]
    fn offset_is_zero_after_exactly_duration_ticks() {
        let mut shake = ScreenShake::default();
        let mut rng = JitterRng::new(3);
        shake.start(10, 5, Camera::default());

        for _ in 0..4 {
            shake.tick(&mut rng);
            assert!(shake.is_active());
        }
        shake.tick(&mut rng);
        assert_eq!(shake.remaining(), 0);
        assert_eq!(shake.offset(), (0, 0));

        for _ in 0..10 {
            shake.tick(&mut rng);
            assert_eq!(shake.offset(), (0, 0));
        }
    }

    #[test]
    fn zero_magnitude_never_moves() {
        let mut shake = ScreenShake::default();
        let mut rng = JitterRng::new(3);
        shake.start(0, 4, Camera::default());
        for _ in 0..4 {
            shake.tick(&mut rng);
            assert_eq!(shake.offset(), (0, 0));
        }
    }

    #[test]
    fn restart_replaces_the_animation() {
        let mut shake = ScreenShake::default();
        shake.start(3, 2, Camera::new(1, 1));
        shake.start(8, 9, Camera::new(5, 6));
        assert_eq!(shake.magnitude(), 8);
        assert_eq!(shake.remaining(), 9);
        assert_eq!(shake.origin(), (5, 6));
    }
}
