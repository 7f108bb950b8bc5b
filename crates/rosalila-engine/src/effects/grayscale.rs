/// Global desaturation animation.
///
/// `current` is the share of color saturation kept by every draw call
/// (`1.0` = full color). It moves toward `target` by `speed` per tick and
/// never crosses it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grayscale {
    current: f64,
    target: f64,
    speed: f64,
}

impl Default for Grayscale {
    fn default() -> Self {
        Self { current: 1.0, target: 1.0, speed: 0.0 }
    }
}

impl Grayscale {
    /// Sets a new target and speed, then advances once immediately.
    pub fn set(&mut self, target: f64, speed: f64) {
        self.target = target.clamp(0.0, 1.0);
        self.speed = speed.max(0.0);
        self.tick();
    }

    /// Moves `current` one step toward `target`.
    pub fn tick(&mut self) {
        if self.current < self.target {
            self.current = (self.current + self.speed).min(self.target);
        } else if self.current > self.target {
            self.current = (self.current - self.speed).max(self.target);
        }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_to_converge(g: &mut Grayscale) -> u32 {
        let mut n = 0;
        while g.current() != g.target() {
            let before = g.current();
            g.tick();
            n += 1;
            // Never overshoot: distance to target shrinks monotonically.
            assert!((g.target() - g.current()).abs() <= (g.target() - before).abs());
            assert!(n < 10_000, "did not converge");
        }
        n
    }

    #[test]
    fn starts_at_full_color() {
        let g = Grayscale::default();
        assert_eq!(g.current(), 1.0);
        assert_eq!(g.target(), 1.0);
    }

    #[test]
    fn set_advances_immediately() {
        let mut g = Grayscale::default();
        g.set(0.0, 0.25);
        assert_eq!(g.current(), 0.75);
    }

    #[test]
    fn converges_in_ceil_distance_over_speed_ticks() {
        // Speeds and distances that are exact in binary floating point.
        for (target, speed, expected) in [(0.0, 0.25, 4), (0.0, 0.375, 3), (0.5, 0.125, 4)] {
            let mut g = Grayscale::default();
            g.target = target;
            g.speed = speed;
            assert_eq!(ticks_to_converge(&mut g), expected, "target {target} speed {speed}");
        }
    }

    #[test]
    fn converges_upward_without_overshoot() {
        let mut g = Grayscale { current: 0.0, target: 1.0, speed: 0.3 };
        assert_eq!(ticks_to_converge(&mut g), 4);
        assert_eq!(g.current(), 1.0);
    }

    #[test]
    fn zero_speed_holds() {
        let mut g = Grayscale { current: 0.2, target: 0.8, speed: 0.0 };
        g.tick();
        assert_eq!(g.current(), 0.2);
    }
}
