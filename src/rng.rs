//! Injected uniform-integer source.
//!
//! `PercolationStats` (spec: Monte-Carlo percolation driver) needs a source of
//! uniformly-distributed grid coordinates. Rather than reaching for a hidden
//! global generator, the source is injected as a trait object, so the
//! statistics code is deterministic and testable independent of whichever RNG
//! backs production runs.

/// A source of uniformly distributed integers in an inclusive range.
pub trait UniformRng {
    /// Draw a value uniformly from `[lo, hi]` inclusive.
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32;
}

/// Production RNG backed by `fastrand`.
pub struct FastrandUniformRng(fastrand::Rng);

impl FastrandUniformRng {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for FastrandUniformRng {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRng for FastrandUniformRng {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        self.0.i32(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastrand_rng_stays_in_range() {
        let mut rng = FastrandUniformRng::with_seed(7);
        for _ in 0..1000 {
            let v = rng.uniform_int(3, 9);
            assert!((3..=9).contains(&v));
        }
    }
}
