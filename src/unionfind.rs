//! Union-Find (disjoint-set) variants plus an open/blocked overlay.
//!
//! Two concrete algorithms share one capability trait rather than a class
//! hierarchy (`QuickUnionFind` is kept for pedagogy; `WeightedUnionFind` with
//! path halving is what `Percolation` actually uses). `OpenOverlay` composes
//! over either one, reusing its backing array for blocked/open state instead
//! of allocating a parallel one.

use crate::error::UnionFindError;

/// Capability interface shared by all UnionFind variants.
pub trait UnionFind {
    /// True iff `p` and `q` are in the same equivalence class.
    fn connected(&mut self, p: usize, q: usize) -> bool;

    /// Merge the classes containing `p` and `q`. Idempotent if already joined.
    fn join(&mut self, p: usize, q: usize);

    /// The stored parent entry for `p`, for inspection/testing.
    fn id(&self, p: usize) -> i64;

    /// Number of sites.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Crate-internal hook letting `OpenOverlay` share the backing array of a
/// concrete UnionFind instead of keeping a second array just for open/blocked
/// state.
pub trait RawStorage: UnionFind + Sized {
    fn with_initial(n: usize, initial_id: i64) -> Self;
    fn raw_id(&self, p: usize) -> i64;
    fn set_raw_id(&mut self, p: usize, val: i64);
}

fn check_index(i: usize, len: usize) -> Result<(), UnionFindError> {
    if i < len {
        Ok(())
    } else {
        Err(UnionFindError::IndexOutOfRange { index: i, len })
    }
}

/// Quick-union: `id[p]` holds the representative directly. O(1) query,
/// O(n) update. Retained for pedagogy; prefer `WeightedUnionFind`.
pub struct QuickUnionFind {
    id: Vec<i64>,
}

impl QuickUnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            id: (0..n as i64).collect(),
        }
    }

    /// Checked index access, surfacing out-of-range as an error rather than
    /// a panic — out-of-range is a programming error at the call site, but
    /// the library still reports rather than aborts.
    pub fn try_connected(&mut self, p: usize, q: usize) -> Result<bool, UnionFindError> {
        check_index(p, self.id.len())?;
        check_index(q, self.id.len())?;
        Ok(self.connected(p, q))
    }
}

impl RawStorage for QuickUnionFind {
    fn with_initial(n: usize, initial_id: i64) -> Self {
        Self {
            id: vec![initial_id; n],
        }
    }

    fn raw_id(&self, p: usize) -> i64 {
        self.id[p]
    }

    fn set_raw_id(&mut self, p: usize, val: i64) {
        self.id[p] = val;
    }
}

impl UnionFind for QuickUnionFind {
    fn connected(&mut self, p: usize, q: usize) -> bool {
        self.id[p] == self.id[q]
    }

    fn join(&mut self, p: usize, q: usize) {
        let pid = self.id[p];
        let qid = self.id[q];
        if pid == qid {
            return;
        }
        for entry in self.id.iter_mut() {
            if *entry == pid {
                *entry = qid;
            }
        }
    }

    fn id(&self, p: usize) -> i64 {
        self.id[p]
    }

    fn len(&self) -> usize {
        self.id.len()
    }
}

/// Weighted quick-union with one-pass path halving.
///
/// `root(i)` walks parent links to the fixed point; while walking, it points
/// every visited node at its grandparent. `join` attaches the smaller tree
/// under the larger root, breaking ties by attaching `q`'s root under `p`'s.
pub struct WeightedUnionFind {
    parent: Vec<i64>,
    size: Vec<u32>,
}

impl WeightedUnionFind {
    pub fn new(n: usize) -> Self {
        let mut uf = Self::with_initial(n, -1);
        for i in 0..n {
            uf.parent[i] = i as i64;
        }
        uf
    }

    fn root(&mut self, i: usize) -> usize {
        let mut i = i;
        while self.parent[i] != i as i64 {
            let parent = self.parent[i] as usize;
            let grandparent = self.parent[parent];
            self.parent[i] = grandparent;
            i = parent;
        }
        i
    }

    /// Depth of `i`'s tree, measured without path compression — used by the
    /// invariant test that the tree depth stays within `floor(log2(size)) + 1`.
    pub fn depth(&self, mut i: usize) -> u32 {
        let mut depth = 0;
        while self.parent[i] != i as i64 {
            i = self.parent[i] as usize;
            depth += 1;
        }
        depth
    }

    pub fn tree_size(&mut self, i: usize) -> u32 {
        let root = self.root(i);
        self.size[root]
    }
}

impl RawStorage for WeightedUnionFind {
    fn with_initial(n: usize, initial_id: i64) -> Self {
        Self {
            parent: vec![initial_id; n],
            size: vec![1; n],
        }
    }

    fn raw_id(&self, p: usize) -> i64 {
        self.parent[p]
    }

    fn set_raw_id(&mut self, p: usize, val: i64) {
        self.parent[p] = val;
    }
}

impl UnionFind for WeightedUnionFind {
    fn connected(&mut self, p: usize, q: usize) -> bool {
        self.root(p) == self.root(q)
    }

    fn join(&mut self, p: usize, q: usize) {
        let root_p = self.root(p);
        let root_q = self.root(q);
        if root_p == root_q {
            return;
        }
        if self.size[root_p] < self.size[root_q] {
            self.parent[root_p] = root_q as i64;
            self.size[root_q] += self.size[root_p];
        } else {
            self.parent[root_q] = root_p as i64;
            self.size[root_p] += self.size[root_q];
        }
    }

    fn id(&self, p: usize) -> i64 {
        self.parent[p]
    }

    fn len(&self) -> usize {
        self.parent.len()
    }
}

/// Composition of any `UnionFind` variant with a blocked/open overlay.
///
/// Sites start blocked (`id == BLOCKED`). `open` makes a site its own root;
/// `connected`/`join` treat a blocked endpoint as unrelated to everything,
/// including itself.
pub struct OpenOverlay<T> {
    inner: T,
}

const BLOCKED: i64 = -1;

impl<T: RawStorage> OpenOverlay<T> {
    pub fn new(n: usize) -> Self {
        Self {
            inner: T::with_initial(n, BLOCKED),
        }
    }

    pub fn is_open(&self, p: usize) -> bool {
        self.inner.raw_id(p) != BLOCKED
    }

    /// Opens `p`. Idempotent.
    pub fn open(&mut self, p: usize) {
        if !self.is_open(p) {
            self.inner.set_raw_id(p, p as i64);
        }
    }
}

impl<T: RawStorage> UnionFind for OpenOverlay<T> {
    fn connected(&mut self, p: usize, q: usize) -> bool {
        if !self.is_open(p) || !self.is_open(q) {
            return false;
        }
        self.inner.connected(p, q)
    }

    fn join(&mut self, p: usize, q: usize) {
        if !self.is_open(p) || !self.is_open(q) {
            return;
        }
        self.inner.join(p, q);
    }

    fn id(&self, p: usize) -> i64 {
        self.inner.raw_id(p)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario from spec §8.1: N=10, the listed joins connect every site.
    #[test]
    fn weighted_uf_join_sequence() {
        let mut uf = WeightedUnionFind::new(10);
        for (p, q) in [(4, 3), (3, 8), (6, 5), (9, 4), (2, 1), (5, 0), (7, 2), (6, 1), (7, 3)] {
            uf.join(p, q);
        }
        assert!(uf.connected(8, 9));
        assert!(uf.connected(5, 0));
        for i in 0..10 {
            for j in 0..10 {
                assert!(uf.connected(i, j), "{i} and {j} should be connected");
            }
        }
    }

    #[test]
    fn weighted_uf_depth_bound() {
        let mut uf = WeightedUnionFind::new(16);
        for i in 1..16 {
            uf.join(0, i);
        }
        for i in 0..16 {
            let bound = (16f64.log2().floor() as u32) + 1;
            assert!(uf.depth(i) <= bound);
        }
    }

    #[test]
    fn quick_uf_join_is_o_n_but_correct() {
        let mut uf = QuickUnionFind::new(5);
        uf.join(0, 1);
        uf.join(1, 2);
        assert!(uf.connected(0, 2));
        assert!(!uf.connected(0, 3));
    }

    #[test]
    fn overlay_blocked_site_connects_to_nothing_including_itself() {
        let mut overlay: OpenOverlay<WeightedUnionFind> = OpenOverlay::new(4);
        assert!(!overlay.connected(0, 0));
        overlay.join(0, 1); // no-op, both blocked
        assert!(!overlay.is_open(0));
        overlay.open(0);
        assert!(overlay.connected(0, 0));
        assert!(!overlay.connected(0, 1)); // 1 still blocked
    }

    #[test]
    fn overlay_open_is_idempotent() {
        let mut overlay: OpenOverlay<WeightedUnionFind> = OpenOverlay::new(4);
        overlay.open(2);
        overlay.open(2);
        assert!(overlay.is_open(2));
    }

    #[test]
    fn out_of_range_index_is_reported_not_panicked() {
        let mut uf = QuickUnionFind::new(3);
        assert_eq!(
            uf.try_connected(0, 5),
            Err(UnionFindError::IndexOutOfRange { index: 5, len: 3 })
        );
    }
}
