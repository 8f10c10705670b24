//! Sort-by-slope detection of maximal collinear point sets.
//!
//! `Point` carries the y-then-x total order spec.md mandates plus a
//! slope-order comparator used to rank other points around a base point.
//! `FastCollinearPoints` implements the O(n^2 log n) emit-once algorithm;
//! `BruteCollinearPoints` enumerates 4-subsets directly and does not merge
//! overlapping runs of >=5 collinear points, by design.

use std::cmp::Ordering;
use std::fmt;

/// A point in the integer plane. Ordered lexicographically by `(y, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Slope from `self` to `other`, using the convention that makes a
    /// stable sort over slopes correctly bucket collinear points:
    /// - slope to itself: `-inf`
    /// - vertical (`dx == 0`): `+inf`
    /// - horizontal (`dy == 0`): `+0.0` (never a signed negative zero)
    /// - otherwise: `dy / dx`.
    pub fn slope(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0 && dy == 0 {
            f64::NEG_INFINITY
        } else if dx == 0 {
            f64::INFINITY
        } else if dy == 0 {
            0.0_f64
        } else {
            dy as f64 / dx as f64
        }
    }

    /// A comparator ranking points by slope with respect to `self`, ties
    /// broken by the point total order.
    pub fn slope_order(&self) -> impl Fn(&Point, &Point) -> Ordering + '_ {
        move |p, q| {
            self.slope(p)
                .partial_cmp(&self.slope(q))
                .unwrap_or(Ordering::Equal)
                .then_with(|| p.cmp(q))
        }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An ordered pair of distinct points, interpreted as the segment joining
/// them. Equality is by endpoint identity, not geometric collinearity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub p: Point,
    pub q: Point,
}

impl LineSegment {
    pub fn new(p: Point, q: Point) -> Self {
        LineSegment { p, q }
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.p, self.q)
    }
}

fn has_duplicate(sorted: &[Point]) -> bool {
    sorted.windows(2).any(|w| w[0] == w[1])
}

/// Brute-force detector: enumerates every 4-subset and reports one exactly
/// when all four points are collinear. Does not merge runs of five or more
/// collinear points — a 5-point collinear set yields `C(5,4) = 5` overlapping
/// segments, which is an intentional limitation of the brute algorithm, not
/// a bug.
pub struct BruteCollinearPoints {
    segments: Vec<LineSegment>,
    duplicate: bool,
}

impl BruteCollinearPoints {
    pub fn new(points: &[Point]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort();

        if has_duplicate(&sorted) {
            return BruteCollinearPoints {
                segments: Vec::new(),
                duplicate: true,
            };
        }

        let mut segments = Vec::new();
        let n = sorted.len();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    for m in (k + 1)..n {
                        let slope_ij = sorted[i].slope(&sorted[j]);
                        if slope_ij == sorted[i].slope(&sorted[k])
                            && slope_ij == sorted[i].slope(&sorted[m])
                        {
                            segments.push(LineSegment::new(sorted[i], sorted[m]));
                        }
                    }
                }
            }
        }

        BruteCollinearPoints {
            segments,
            duplicate: false,
        }
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn has_duplicate(&self) -> bool {
        self.duplicate
    }
}

/// Fast sort-by-slope detector. For each base point, the remaining points are
/// stable-sorted by slope with respect to it; a run of `>= 3` equal slopes
/// (four points including the base) is a candidate maximal segment, emitted
/// only when the base is the minimum of the whole run — this duplicate
/// suppression rule guarantees every maximal segment is reported exactly once.
pub struct FastCollinearPoints {
    segments: Vec<LineSegment>,
    duplicate: bool,
}

impl FastCollinearPoints {
    pub fn new(points: &[Point]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort();

        if has_duplicate(&sorted) {
            return FastCollinearPoints {
                segments: Vec::new(),
                duplicate: true,
            };
        }

        let mut segments = Vec::new();
        let n = sorted.len();

        for i in 0..n {
            let base = sorted[i];
            let mut others: Vec<Point> = sorted
                .iter()
                .enumerate()
                .filter(|&(idx, _)| idx != i)
                .map(|(_, &p)| p)
                .collect();
            others.sort_by(base.slope_order());

            let mut run_start = 0;
            while run_start < others.len() {
                let mut run_end = run_start + 1;
                let run_slope = base.slope(&others[run_start]);
                while run_end < others.len() && base.slope(&others[run_end]) == run_slope {
                    run_end += 1;
                }
                let run_len = run_end - run_start;
                if run_len >= 3 && base < others[run_start] {
                    segments.push(LineSegment::new(base, others[run_end - 1]));
                }
                run_start = run_end;
            }
        }

        FastCollinearPoints {
            segments,
            duplicate: false,
        }
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn has_duplicate(&self) -> bool {
        self.duplicate
    }
}
