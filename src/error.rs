//! Shared error types for the algorithmic cores.
//!
//! Each core reports contract failures (out-of-range indices, empty-structure
//! queries, invalid boards) through a small enum with a manual `Display`/
//! `std::error::Error` impl, rather than panicking on caller-controlled input.

use std::fmt;

/// Errors raised by the `UnionFind` capability and its `OpenOverlay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionFindError {
    /// Index passed to a UnionFind operation was outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for UnionFindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnionFindError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} sites")
            }
        }
    }
}

impl std::error::Error for UnionFindError {}

/// Errors raised by `Percolation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercolationError {
    /// Row/column outside the 1-based `[1, n]` grid range.
    InvalidSite { row: i64, col: i64, n: usize },
}

impl fmt::Display for PercolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercolationError::InvalidSite { row, col, n } => {
                write!(f, "site ({row}, {col}) out of range for {n}x{n} grid")
            }
        }
    }
}

impl std::error::Error for PercolationError {}

/// Errors raised by `KdTree2D`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KdTreeError {
    /// Point lies outside the closed unit square `[0,1] x [0,1]`.
    OutOfUnitSquare { x: f64, y: f64 },
    /// `nearest` was called on a tree with no points.
    Empty,
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KdTreeError::OutOfUnitSquare { x, y } => {
                write!(f, "point ({x}, {y}) lies outside the unit square")
            }
            KdTreeError::Empty => write!(f, "tree is empty"),
        }
    }
}

impl std::error::Error for KdTreeError {}

/// Errors raised building a `Board`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Dimension outside the supported `[2, 127]` range.
    InvalidDimension { n: usize },
    /// A row did not have `n` entries.
    RaggedRow { row: usize },
    /// An entry was outside `[0, n*n)`.
    ValueOutOfRange { value: i32, n: usize },
    /// A value appeared more than once, or the blank was missing/duplicated.
    NotAPermutation,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidDimension { n } => {
                write!(f, "board dimension {n} outside supported range [2, 127]")
            }
            BoardError::RaggedRow { row } => write!(f, "row {row} has the wrong length"),
            BoardError::ValueOutOfRange { value, n } => {
                write!(f, "value {value} out of range for {n}x{n} board")
            }
            BoardError::NotAPermutation => {
                write!(f, "board entries are not a permutation of 0..n*n")
            }
        }
    }
}

impl std::error::Error for BoardError {}
