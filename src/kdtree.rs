//! 2D k-d tree over the unit square.
//!
//! Level parity selects the splitting axis (even levels split on x, odd on
//! y). Each node additionally stores the axis-aligned rectangle that bounds
//! the region its subtree can occupy, so `range` can prune whole subtrees and
//! `nearest` can prune by squared distance to a region rather than to a
//! point.

use crate::error::KdTreeError;

/// A point in the closed unit square `[0,1] x [0,1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Coordinate on the axis split at `level` (even: x, odd: y).
    fn axis_coord(&self, level: u32) -> f64 {
        if level % 2 == 0 { self.x } else { self.y }
    }

    /// Coordinate on the *other* axis, used to break ties so two points that
    /// share a split-axis coordinate don't recurse forever.
    fn off_axis_coord(&self, level: u32) -> f64 {
        if level % 2 == 0 { self.y } else { self.x }
    }
}

/// An axis-aligned, closed rectangle: `xmin <= x <= xmax`, `ymin <= y <= ymax`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Rectangle {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        assert!(xmin <= xmax && ymin <= ymax, "invalid rectangle bounds");
        Rectangle { xmin, ymin, xmax, ymax }
    }

    pub const UNIT_SQUARE: Rectangle = Rectangle {
        xmin: 0.0,
        ymin: 0.0,
        xmax: 1.0,
        ymax: 1.0,
    };

    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.xmin <= other.xmax
            && self.xmax >= other.xmin
            && self.ymin <= other.ymax
            && self.ymax >= other.ymin
    }

    /// Squared distance from `p` to the closest point of this rectangle; 0 if
    /// `p` is contained.
    pub fn distance_squared(&self, p: &Point2D) -> f64 {
        let dx = if p.x < self.xmin {
            self.xmin - p.x
        } else if p.x > self.xmax {
            p.x - self.xmax
        } else {
            0.0
        };
        let dy = if p.y < self.ymin {
            self.ymin - p.y
        } else if p.y > self.ymax {
            p.y - self.ymax
        } else {
            0.0
        };
        dx * dx + dy * dy
    }

    fn left_half(&self, level: u32, split: f64) -> Rectangle {
        if level % 2 == 0 {
            Rectangle::new(self.xmin, self.ymin, split, self.ymax)
        } else {
            Rectangle::new(self.xmin, self.ymin, self.xmax, split)
        }
    }

    fn right_half(&self, level: u32, split: f64) -> Rectangle {
        if level % 2 == 0 {
            Rectangle::new(split, self.ymin, self.xmax, self.ymax)
        } else {
            Rectangle::new(self.xmin, split, self.xmax, self.ymax)
        }
    }
}

struct Node {
    point: Point2D,
    rect: Rectangle,
    lb: Option<Box<Node>>,
    rt: Option<Box<Node>>,
}

/// A set of points in the unit square, stored as a 2D-tree.
#[derive(Default)]
pub struct KdTree2D {
    root: Option<Box<Node>>,
    size: usize,
}

impl KdTree2D {
    pub fn new() -> Self {
        KdTree2D { root: None, size: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Inserts `p`. Returns `Ok(true)` if a new node was created,
    /// `Ok(false)` if `p` was already present (ignored, no error). Rejects
    /// points outside the unit square.
    pub fn insert(&mut self, p: Point2D) -> Result<bool, KdTreeError> {
        if !p.in_unit_square() {
            return Err(KdTreeError::OutOfUnitSquare { x: p.x, y: p.y });
        }
        let inserted = Self::insert_rec(&mut self.root, p, Rectangle::UNIT_SQUARE, 0);
        if inserted {
            self.size += 1;
        }
        Ok(inserted)
    }

    fn insert_rec(slot: &mut Option<Box<Node>>, p: Point2D, rect: Rectangle, level: u32) -> bool {
        match slot {
            None => {
                *slot = Some(Box::new(Node {
                    point: p,
                    rect,
                    lb: None,
                    rt: None,
                }));
                true
            }
            Some(node) => {
                if p.x == node.point.x && p.y == node.point.y {
                    return false;
                }
                let cmp = Self::axis_cmp(&p, &node.point, level);
                if cmp < 0.0 {
                    let split = node.point.axis_coord(level);
                    let child_rect = node.rect.left_half(level, split);
                    Self::insert_rec(&mut node.lb, p, child_rect, level + 1)
                } else {
                    let split = node.point.axis_coord(level);
                    let child_rect = node.rect.right_half(level, split);
                    Self::insert_rec(&mut node.rt, p, child_rect, level + 1)
                }
            }
        }
    }

    /// Compares `p` to `node_point` at `level`: negative if `p` goes left/bottom,
    /// positive if right/top, zero only on exact axis-coordinate equality
    /// (ties are then broken by the caller via the off-axis coordinate,
    /// matching the insert/nearest descent rule).
    fn axis_cmp(p: &Point2D, node_point: &Point2D, level: u32) -> f64 {
        let diff = p.axis_coord(level) - node_point.axis_coord(level);
        if diff != 0.0 {
            diff
        } else {
            p.off_axis_coord(level) - node_point.off_axis_coord(level)
        }
    }

    pub fn contains(&self, p: &Point2D) -> Result<bool, KdTreeError> {
        if !p.in_unit_square() {
            return Err(KdTreeError::OutOfUnitSquare { x: p.x, y: p.y });
        }
        Ok(Self::contains_rec(&self.root, p, 0))
    }

    fn contains_rec(slot: &Option<Box<Node>>, p: &Point2D, level: u32) -> bool {
        match slot {
            None => false,
            Some(node) => {
                if p.x == node.point.x && p.y == node.point.y {
                    return true;
                }
                let cmp = Self::axis_cmp(p, &node.point, level);
                if cmp < 0.0 {
                    Self::contains_rec(&node.lb, p, level + 1)
                } else {
                    Self::contains_rec(&node.rt, p, level + 1)
                }
            }
        }
    }

    /// Every point inserted whose coordinates lie within `rect` (inclusive),
    /// in unspecified order.
    pub fn range(&self, rect: &Rectangle) -> Vec<Point2D> {
        let mut out = Vec::new();
        Self::range_rec(&self.root, rect, &mut out);
        out
    }

    fn range_rec(slot: &Option<Box<Node>>, rect: &Rectangle, out: &mut Vec<Point2D>) {
        let Some(node) = slot else { return };
        if !rect.intersects(&node.rect) {
            return;
        }
        if rect.contains(&node.point) {
            out.push(node.point);
        }
        Self::range_rec(&node.lb, rect, out);
        Self::range_rec(&node.rt, rect, out);
    }

    /// The point nearest to `q`. Errors if the tree is empty or `q` lies
    /// outside the unit square.
    pub fn nearest(&self, q: &Point2D) -> Result<Point2D, KdTreeError> {
        if !q.in_unit_square() {
            return Err(KdTreeError::OutOfUnitSquare { x: q.x, y: q.y });
        }
        let root = self.root.as_ref().ok_or(KdTreeError::Empty)?;
        let mut best = root.point;
        let mut best_dist = q.distance_squared(&root.point);
        Self::nearest_rec(&self.root, q, 0, &mut best, &mut best_dist);
        Ok(best)
    }

    fn nearest_rec(
        slot: &Option<Box<Node>>,
        q: &Point2D,
        level: u32,
        best: &mut Point2D,
        best_dist: &mut f64,
    ) {
        let Some(node) = slot else { return };
        if node.rect.distance_squared(q) >= *best_dist {
            return;
        }
        let d = q.distance_squared(&node.point);
        if d < *best_dist {
            *best_dist = d;
            *best = node.point;
        }

        let cmp = Self::axis_cmp(q, &node.point, level);
        let (first, second) = if cmp < 0.0 {
            (&node.lb, &node.rt)
        } else {
            (&node.rt, &node.lb)
        };
        Self::nearest_rec(first, q, level + 1, best, best_dist);
        Self::nearest_rec(second, q, level + 1, best, best_dist);
    }

    /// Each stored point paired with the region rectangle current when it
    /// was inserted — useful for asserting the region-clipping invariant and
    /// for diagnostic rendering.
    pub fn draw_data(&self) -> Vec<(Point2D, Rectangle)> {
        let mut out = Vec::new();
        Self::draw_data_rec(&self.root, &mut out);
        out
    }

    fn draw_data_rec(slot: &Option<Box<Node>>, out: &mut Vec<(Point2D, Rectangle)>) {
        let Some(node) = slot else { return };
        out.push((node.point, node.rect));
        Self::draw_data_rec(&node.lb, out);
        Self::draw_data_rec(&node.rt, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(points: &[(f64, f64)]) -> KdTree2D {
        let mut tree = KdTree2D::new();
        for &(x, y) in points {
            tree.insert(Point2D::new(x, y)).unwrap();
        }
        tree
    }

    const FIXTURE: &[(f64, f64)] = &[(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)];

    /// spec §8 scenario 4.
    #[test]
    fn nearest_matches_fixture() {
        let tree = build(FIXTURE);
        let nearest = tree.nearest(&Point2D::new(0.81, 0.30)).unwrap();
        assert_eq!(nearest, Point2D::new(0.7, 0.2));
    }

    /// spec §8 scenario 5.
    #[test]
    fn range_matches_fixture() {
        let tree = build(FIXTURE);
        let rect = Rectangle::new(0.3, 0.1, 0.8, 0.8);
        let mut found = tree.range(&rect);
        found.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        let mut expected = vec![
            Point2D::new(0.5, 0.4),
            Point2D::new(0.4, 0.7),
            Point2D::new(0.7, 0.2),
        ];
        expected.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        assert_eq!(found, expected);
    }

    #[test]
    fn size_counts_distinct_insertions_only() {
        let mut tree = KdTree2D::new();
        assert!(tree.insert(Point2D::new(0.5, 0.5)).unwrap());
        assert!(!tree.insert(Point2D::new(0.5, 0.5)).unwrap());
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn insert_rejects_points_outside_unit_square() {
        let mut tree = KdTree2D::new();
        assert!(tree.insert(Point2D::new(1.1, 0.5)).is_err());
        assert!(tree.insert(Point2D::new(-0.1, 0.5)).is_err());
        assert_eq!(tree.size(), 0);
    }

    #[test]
    fn nearest_on_empty_tree_is_an_error() {
        let tree = KdTree2D::new();
        assert_eq!(tree.nearest(&Point2D::new(0.5, 0.5)), Err(KdTreeError::Empty));
    }

    #[test]
    fn range_matches_brute_force_on_random_points() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut tree = KdTree2D::new();
        let mut points = Vec::new();
        for _ in 0..200 {
            let p = Point2D::new(rng.f64(), rng.f64());
            if tree.insert(p).unwrap() {
                points.push(p);
            }
        }
        let rect = Rectangle::new(0.2, 0.2, 0.6, 0.9);
        let mut expected: Vec<Point2D> = points.into_iter().filter(|p| rect.contains(p)).collect();
        let mut actual = tree.range(&rect);
        let key = |p: &Point2D| (p.x.to_bits(), p.y.to_bits());
        expected.sort_by_key(key);
        actual.sort_by_key(key);
        assert_eq!(expected, actual);
    }

    #[test]
    fn nearest_matches_brute_force_on_random_points() {
        let mut rng = fastrand::Rng::with_seed(99);
        let mut tree = KdTree2D::new();
        let mut points = Vec::new();
        for _ in 0..200 {
            let p = Point2D::new(rng.f64(), rng.f64());
            if tree.insert(p).unwrap() {
                points.push(p);
            }
        }
        let query = Point2D::new(0.33, 0.81);
        let best = tree.nearest(&query).unwrap();
        let best_dist = query.distance_squared(&best);
        for p in &points {
            assert!(query.distance_squared(p) >= best_dist - 1e-12);
        }
    }

    #[test]
    fn child_region_is_clipped_from_parent_region() {
        let tree = build(FIXTURE);
        for (_, rect) in tree.draw_data() {
            assert!(rect.xmin >= 0.0 && rect.xmax <= 1.0);
            assert!(rect.ymin >= 0.0 && rect.ymax <= 1.0);
        }
    }
}
