//! Algorithmic exercises: Union-Find/percolation, collinear-point detection,
//! a 2D k-d tree, and an A* sliding-tile puzzle solver.
//!
//! ## Modules
//!
//! - [`unionfind`] - Quick and weighted Union-Find, plus an open/blocked overlay
//! - [`percolation`] - Percolation system and Monte-Carlo threshold estimator
//! - [`collinear`] - Sort-by-slope detection of maximal collinear point sets
//! - [`kdtree`] - 2D k-d tree over the unit square
//! - [`board`] - Sliding-tile puzzle board
//! - [`puzzle`] - A* solver over the sliding-tile puzzle game tree
//! - [`rng`] - Injected uniform-integer source used by `PercolationStats`
//! - [`error`] - Shared error types for contract failures

pub mod board;
pub mod collinear;
pub mod error;
pub mod kdtree;
pub mod percolation;
pub mod puzzle;
pub mod rng;
pub mod unionfind;
