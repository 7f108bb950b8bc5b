use std::time::{Duration, Instant};

/// Frame rate the engine caps to unless told otherwise.
pub const DEFAULT_FPS: u32 = 60;

/// Sleep-based frame limiter.
///
/// The period is whole milliseconds (`1000 / fps`, so 60 Hz is 16 ms). A frame
/// that already took longer than the period is not compensated for later: no
/// frame skipping, no catch-up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    last: Instant,
    frame: u64,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            period: Duration::from_millis(u64::from(1000 / fps)),
            last: Instant::now(),
            frame: 0,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Frames capped so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// How long to sleep after `elapsed` has passed since the last frame.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.period.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Sleeps out the rest of the frame period and starts the next one.
    pub fn cap(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        if let Some(wait) = self.remaining(self.last.elapsed()) {
            std::thread::sleep(wait);
        }
        self.last = Instant::now();
    }

    /// Restarts the period from now, e.g. after a long stall.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_integer_milliseconds() {
        assert_eq!(FramePacer::new(60).period(), Duration::from_millis(16));
        assert_eq!(FramePacer::new(30).period(), Duration::from_millis(33));
        assert_eq!(FramePacer::new(0).period(), Duration::from_millis(1000));
    }

    #[test]
    fn fast_frames_wait_out_the_period() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.remaining(Duration::from_millis(10)), Some(Duration::from_millis(6)));
        assert_eq!(pacer.remaining(Duration::ZERO), Some(Duration::from_millis(16)));
    }

    #[test]
    fn slow_frames_do_not_wait() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.remaining(Duration::from_millis(16)), None);
        assert_eq!(pacer.remaining(Duration::from_millis(40)), None);
    }

    #[test]
    fn cap_sleeps_and_counts_frames() {
        let mut pacer = FramePacer::new(200); // 5 ms
        pacer.reset();
        let start = Instant::now();
        pacer.cap();
        pacer.cap();
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(pacer.frame(), 2);
    }
}
