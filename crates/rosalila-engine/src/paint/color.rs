/// Straight-alpha RGBA tint applied to a draw call.
///
/// The tint multiplies the sampled texel; white (`255, 255, 255, 255`) leaves
/// the texture unchanged.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ColorEffect {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Default for ColorEffect {
    fn default() -> Self {
        Self::WHITE
    }
}

impl ColorEffect {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Integer average of the three color channels.
    #[inline]
    pub fn luma(self) -> u8 {
        ((self.red as u32 + self.green as u32 + self.blue as u32) / 3) as u8
    }

    /// Blends the color toward its luma.
    ///
    /// `percentage` is the share of the original saturation that survives:
    /// `1.0` returns the color unchanged, `0.0` returns `(L, L, L)`. Each
    /// channel is `L + (c - L) * percentage`, truncated. Alpha is untouched.
    pub fn grayscaled(self, percentage: f64) -> Self {
        let luma = self.luma() as f64;
        let blend = |c: u8| -> u8 {
            let v = luma + (c as f64 - luma) * percentage;
            v.clamp(0.0, 255.0) as u8
        };
        Self {
            red: blend(self.red),
            green: blend(self.green),
            blue: blend(self.blue),
            alpha: self.alpha,
        }
    }

    /// Normalized `[r, g, b, a]` for vertex upload.
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
            self.alpha as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [ColorEffect; 4] = [
        ColorEffect::new(255, 0, 0, 255),
        ColorEffect::new(12, 200, 99, 128),
        ColorEffect::new(0, 0, 0, 0),
        ColorEffect::new(255, 255, 255, 10),
    ];

    #[test]
    fn full_percentage_is_identity() {
        for c in SAMPLES {
            assert_eq!(c.grayscaled(1.0), c);
        }
    }

    #[test]
    fn zero_percentage_is_luma() {
        for c in SAMPLES {
            let l = c.luma();
            assert_eq!(c.grayscaled(0.0), ColorEffect::new(l, l, l, c.alpha));
        }
    }

    #[test]
    fn intermediate_percentage_interpolates() {
        // luma = (200 + 100 + 0) / 3 = 100
        let c = ColorEffect::new(200, 100, 0, 77);
        let half = c.grayscaled(0.5);
        assert_eq!(half, ColorEffect::new(150, 100, 50, 77));
    }

    #[test]
    fn luma_uses_integer_average() {
        assert_eq!(ColorEffect::new(1, 1, 2, 0).luma(), 1);
        assert_eq!(ColorEffect::new(255, 255, 255, 0).luma(), 255);
    }

    #[test]
    fn normalized_channels() {
        assert_eq!(ColorEffect::WHITE.to_f32(), [1.0; 4]);
        assert_eq!(ColorEffect::new(0, 0, 0, 0).to_f32(), [0.0; 4]);
    }
}
