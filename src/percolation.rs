//! Percolation system and Monte-Carlo threshold estimator.
//!
//! An n-by-n grid of sites mapped onto an `OpenOverlay<WeightedUnionFind>` of
//! `n*n + 2` sites, with two virtual sites (index 0 = top, index n*n+1 =
//! bottom) wired in at construction. `PercolationStats` repeatedly opens
//! random sites until the system percolates and reports the threshold
//! statistics over many trials.

use std::fmt;

use crate::error::PercolationError;
use crate::rng::UniformRng;
use crate::unionfind::{OpenOverlay, UnionFind, WeightedUnionFind};

/// A single n-by-n percolation system.
pub struct Percolation {
    uf: OpenOverlay<WeightedUnionFind>,
    /// Second overlay with no virtual-bottom wiring, used only by
    /// `is_full_no_backwash` (spec §9 redesign (a)).
    uf_no_backwash: OpenOverlay<WeightedUnionFind>,
    n: usize,
    top: usize,
    bottom: usize,
    open_sites: usize,
}

impl Percolation {
    /// Creates a fully-blocked `n`-by-`n` grid. Panics if `n == 0`, matching
    /// the original's `assert(n > 0)` — grid size is a construction-time
    /// invariant, not caller input to validate per-call.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "grid size must be positive");
        let sites = n * n + 2;
        let mut uf = OpenOverlay::new(sites);
        let mut uf_no_backwash = OpenOverlay::new(sites - 1);
        let top = 0;
        let bottom = sites - 1;
        uf.open(top);
        uf.open(bottom);
        uf_no_backwash.open(top);
        Percolation {
            uf,
            uf_no_backwash,
            n,
            top,
            bottom,
            open_sites: 0,
        }
    }

    fn is_valid_site(&self, row: i64, col: i64) -> bool {
        row >= 1 && row as usize <= self.n && col >= 1 && col as usize <= self.n
    }

    fn check(&self, row: i64, col: i64) -> Result<(), PercolationError> {
        if self.is_valid_site(row, col) {
            Ok(())
        } else {
            Err(PercolationError::InvalidSite {
                row,
                col,
                n: self.n,
            })
        }
    }

    /// Maps 1-based `(row, col)` to the index into the backing UnionFind.
    fn index(&self, row: i64, col: i64) -> usize {
        (row as usize - 1) * self.n + col as usize
    }

    pub fn is_open(&self, row: i64, col: i64) -> Result<bool, PercolationError> {
        self.check(row, col)?;
        Ok(self.uf.is_open(self.index(row, col)))
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    /// True iff `(row, col)` is open and connected to the virtual top.
    ///
    /// Preserves the "backwash" behavior of the original single-virtual-bottom
    /// design: once the system percolates, some non-top-reachable bottom-row
    /// sites can read as full via a side path through the virtual bottom.
    /// See `is_full_no_backwash` for the corrected variant.
    pub fn is_full(&mut self, row: i64, col: i64) -> Result<bool, PercolationError> {
        self.check(row, col)?;
        let idx = self.index(row, col);
        if !self.uf.is_open(idx) {
            return Ok(false);
        }
        Ok(self.uf.connected(self.top, idx))
    }

    /// Like `is_full`, but backwash-free: uses a second UnionFind with no
    /// virtual-bottom wiring at all.
    pub fn is_full_no_backwash(&mut self, row: i64, col: i64) -> Result<bool, PercolationError> {
        self.check(row, col)?;
        let idx = self.index(row, col);
        if !self.uf_no_backwash.is_open(idx) {
            return Ok(false);
        }
        Ok(self.uf_no_backwash.connected(self.top, idx))
    }

    pub fn percolates(&mut self) -> bool {
        self.uf.connected(self.top, self.bottom)
    }

    /// Opens `(row, col)` and wires it to any open neighbors. No-op if
    /// already open.
    pub fn open(&mut self, row: i64, col: i64) -> Result<(), PercolationError> {
        self.check(row, col)?;
        let idx = self.index(row, col);
        if self.uf.is_open(idx) {
            return Ok(());
        }

        self.uf.open(idx);
        self.uf_no_backwash.open(idx);
        self.open_sites += 1;

        if row == 1 {
            self.uf.join(self.top, idx);
            self.uf_no_backwash.join(self.top, idx);
        } else if self.uf.is_open(self.index(row - 1, col)) {
            self.uf.join(self.index(row - 1, col), idx);
            self.uf_no_backwash.join(self.index(row - 1, col), idx);
        }

        if row as usize == self.n {
            self.uf.join(self.bottom, idx);
            // no_backwash overlay has no virtual bottom to wire to.
        } else if self.uf.is_open(self.index(row + 1, col)) {
            self.uf.join(self.index(row + 1, col), idx);
            self.uf_no_backwash.join(self.index(row + 1, col), idx);
        }

        if col as usize != self.n && self.uf.is_open(self.index(row, col + 1)) {
            self.uf.join(self.index(row, col + 1), idx);
            self.uf_no_backwash.join(self.index(row, col + 1), idx);
        }
        if col != 1 && self.uf.is_open(self.index(row, col - 1)) {
            self.uf.join(self.index(row, col - 1), idx);
            self.uf_no_backwash.join(self.index(row, col - 1), idx);
        }

        Ok(())
    }
}

impl fmt::Display for Percolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   TOP: {}", self.uf.id(self.top))?;
        writeln!(f, "BOTTOM: {}", self.uf.id(self.bottom))?;
        writeln!(f, "Number of Open Sites: {}", self.open_sites)?;
        for row in 1..=self.n as i64 {
            for col in 1..=self.n as i64 {
                write!(f, "{:>5}", self.uf.id(self.index(row, col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Threshold statistics computed over `trials` independent Monte-Carlo runs.
pub struct PercolationStats {
    mean: f64,
    stddev: f64,
    confidence_low: f64,
    confidence_high: f64,
}

impl PercolationStats {
    /// Runs `trials` independent trials on a fresh `n`-by-`n` grid each time,
    /// drawing random sites from `rng` until the system percolates.
    ///
    /// Panics if `n == 0` or `trials == 0` — both are construction-time
    /// invariants of the experiment, not recoverable per-call input.
    pub fn new(n: usize, trials: usize, rng: &mut dyn UniformRng) -> Self {
        assert!(n > 0, "grid size must be positive");
        assert!(trials > 0, "trial count must be positive");

        let thresholds: Vec<f64> = (0..trials).map(|_| Self::run_trial(n, rng)).collect();

        let mean = thresholds.iter().sum::<f64>() / trials as f64;
        let stddev = if trials == 1 {
            0.0
        } else {
            let variance = thresholds
                .iter()
                .map(|t| (t - mean).powi(2))
                .sum::<f64>()
                / (trials - 1) as f64;
            variance.sqrt()
        };
        let margin = 1.96 * stddev / (trials as f64).sqrt();

        PercolationStats {
            mean,
            stddev,
            confidence_low: mean - margin,
            confidence_high: mean + margin,
        }
    }

    fn run_trial(n: usize, rng: &mut dyn UniformRng) -> f64 {
        let mut grid = Percolation::new(n);
        while !grid.percolates() {
            let row = rng.uniform_int(1, n as i32) as i64;
            let col = rng.uniform_int(1, n as i32) as i64;
            if grid.is_open(row, col).expect("row/col drawn in range") {
                continue;
            }
            grid.open(row, col).expect("row/col drawn in range");
        }
        grid.number_of_open_sites() as f64 / (n * n) as f64
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    pub fn confidence_low(&self) -> f64 {
        self.confidence_low
    }

    pub fn confidence_high(&self) -> f64 {
        self.confidence_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSequenceRng {
        values: Vec<i32>,
        pos: usize,
    }

    impl UniformRng for FixedSequenceRng {
        fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v.clamp(lo, hi)
        }
    }

    #[test]
    fn virtual_sites_are_open_at_construction() {
        let p = Percolation::new(3);
        assert_eq!(p.number_of_open_sites(), 0);
    }

    #[test]
    fn opening_full_column_percolates() {
        let mut p = Percolation::new(3);
        for row in 1..=3 {
            p.open(row, 2).unwrap();
        }
        assert!(p.percolates());
        assert!(p.is_full(3, 2).unwrap());
    }

    #[test]
    fn is_open_rejects_out_of_range_site() {
        let p = Percolation::new(3);
        assert!(p.is_open(0, 1).is_err());
        assert!(p.is_open(4, 1).is_err());
    }

    #[test]
    fn backwash_is_preserved_by_default() {
        // Column 1 percolates top-to-bottom. (3,3) is open, in the bottom
        // row, but has no open orthogonal neighbor — it is only "connected"
        // to the percolating path through the shared virtual-bottom sentinel.
        let mut p = Percolation::new(3);
        p.open(1, 1).unwrap();
        p.open(2, 1).unwrap();
        p.open(3, 1).unwrap();
        p.open(3, 3).unwrap();
        assert!(p.percolates());
        // backwash: is_full reports (3,3) as full via the virtual bottom
        assert!(p.is_full(3, 3).unwrap());
        // the corrected variant does not exhibit backwash
        assert!(!p.is_full_no_backwash(3, 3).unwrap());
    }

    #[test]
    fn stats_single_trial_has_zero_stddev() {
        let mut rng = FixedSequenceRng {
            values: vec![1, 1, 2, 1, 1, 2, 2, 1, 2, 2, 1, 1],
            pos: 0,
        };
        let stats = PercolationStats::new(2, 1, &mut rng);
        assert_eq!(stats.stddev(), 0.0);
        assert!(stats.mean() > 0.0 && stats.mean() <= 1.0);
    }
}
