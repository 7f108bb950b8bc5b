/// xorshift32 stream used for screen-shake jitter.
///
/// Not suitable for anything beyond visual noise.
#[derive(Debug, Copy, Clone)]
pub struct JitterRng {
    state: u32,
}

impl JitterRng {
    pub const DEFAULT_SEED: u32 = 0x2545_f491;

    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero.
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Value in `[0, bound)`; `0` when `bound <= 0`. Plain modulo, so slightly
    /// biased toward small values.
    pub fn below(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        (self.next_u32() % bound as u32) as i32
    }
}
