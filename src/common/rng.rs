//! Deterministic random number generation for reproducible runs.
//!
//! All stochastic draws in the filter go through `rand`/`rand_distr`
//! distributions parameterized over any [`rand::Rng`]. [`SimpleRng`] is a
//! minimal seeded generator for tests, benches and demo runs where two
//! executions with the same seed must produce identical particle clouds.

/// Simple deterministic random number generator using Xorshift64.
///
/// This PRNG is:
/// - Minimal (a handful of bit operations)
/// - Fast (no lookup tables, no heavy math)
/// - Deterministic (identical output for the same seed)
/// - Good enough quality for testing
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new SimpleRng with the given seed.
    /// If seed is 0, uses 1 instead to avoid degenerate state.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    #[inline]
    fn next_state(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl rand::RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.next_state() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_state()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut i = 0;
        let len = dest.len();
        while i + 8 <= len {
            let bytes = self.next_state().to_le_bytes();
            dest[i..i + 8].copy_from_slice(&bytes);
            i += 8;
        }
        if i < len {
            let bytes = self.next_state().to_le_bytes();
            let remaining = len - i;
            dest[i..].copy_from_slice(&bytes[..remaining]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
