//! algo-exercises: a small CLI front end over four algorithmic cores.
//!
//! ## Usage
//!
//! - `algo-exercises percolation <n> <trials>` - Monte-Carlo percolation threshold
//! - `algo-exercises collinear <file>` - maximal collinear point sets
//! - `algo-exercises kdtree <file>` - 2D k-d tree size and nearest-neighbor query
//! - `algo-exercises puzzle <file>` - A* sliding-tile puzzle solver

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};

use algo_exercises::board::Board;
use algo_exercises::collinear::{FastCollinearPoints, Point};
use algo_exercises::kdtree::{KdTree2D, Point2D};
use algo_exercises::percolation::PercolationStats;
use algo_exercises::puzzle::{Priority, PuzzleSolver};
use algo_exercises::rng::FastrandUniformRng;

#[derive(Parser)]
#[command(name = "algo-exercises")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the percolation threshold over n-by-n grids via Monte Carlo
    Percolation {
        /// Grid size (n-by-n)
        n: String,
        /// Number of independent trials
        trials: String,
    },
    /// Find every maximal collinear point set in a file of points
    Collinear {
        /// Path to a file: line 1 is a count, followed by one "x y" per line
        path: String,
    },
    /// Build a 2D k-d tree from a file of unit-square points and query it
    Kdtree {
        /// Path to a file of "x y" lines, each in [0,1]x[0,1]
        path: String,
    },
    /// Solve an n-by-n sliding-tile puzzle with A*
    Puzzle {
        /// Path to a file: line 1 is n, followed by n rows of n integers
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Percolation { n, trials } => run_percolation(&n, &trials),
        Commands::Collinear { path } => run_collinear(&path),
        Commands::Kdtree { path } => run_kdtree(&path),
        Commands::Puzzle { path } => run_puzzle(&path),
    }
}

fn run_percolation(n: &str, trials: &str) -> Result<()> {
    let n: i64 = n.parse().map_err(|_| anyhow::anyhow!("n must be an integer (got {n:?})"))?;
    let trials: i64 = trials
        .parse()
        .map_err(|_| anyhow::anyhow!("trials must be an integer (got {trials:?})"))?;
    if n < 1 || trials < 1 {
        bail!("n and trials must both be positive (got n={n}, trials={trials})");
    }
    let start = Instant::now();
    let mut rng = FastrandUniformRng::new();
    let stats = PercolationStats::new(n as usize, trials as usize, &mut rng);

    println!("mean = {}", stats.mean());
    println!("stddev = {}", stats.stddev());
    println!(
        "95% interval = [{}, {}]",
        stats.confidence_low(),
        stats.confidence_high()
    );
    println!("elapsed time = {}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_collinear(path: &str) -> Result<()> {
    let points = read_points(path)?;
    let result = FastCollinearPoints::new(&points);
    if result.has_duplicate() {
        bail!("input file {path} contains a duplicate point");
    }
    for segment in result.segments() {
        println!("{segment}");
    }
    println!("{} segments", result.segments().len());
    Ok(())
}

fn read_points(path: &str) -> Result<Vec<Point>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading collinear input file {path}"))?;
    let mut lines = contents.lines();
    let n: usize = lines
        .next()
        .context("missing point count on line 1")?
        .trim()
        .parse()
        .context("point count on line 1 was not an integer")?;

    let mut points = Vec::with_capacity(n);
    for (i, line) in lines.take(n).enumerate() {
        let mut parts = line.split_whitespace();
        let x: i64 = parts
            .next()
            .with_context(|| format!("line {}: missing x", i + 2))?
            .parse()
            .with_context(|| format!("line {}: x was not an integer", i + 2))?;
        let y: i64 = parts
            .next()
            .with_context(|| format!("line {}: missing y", i + 2))?
            .parse()
            .with_context(|| format!("line {}: y was not an integer", i + 2))?;
        points.push(Point::new(x, y));
    }
    ensure!(
        points.len() == n,
        "expected {n} points but file only had {}",
        points.len()
    );
    Ok(points)
}

fn run_kdtree(path: &str) -> Result<()> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading kdtree input file {path}"))?;

    let mut tree = KdTree2D::new();
    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let x: f64 = parts
            .next()
            .with_context(|| format!("line {}: missing x", i + 1))?
            .parse()
            .with_context(|| format!("line {}: x was not a number", i + 1))?;
        let y: f64 = parts
            .next()
            .with_context(|| format!("line {}: missing y", i + 1))?
            .parse()
            .with_context(|| format!("line {}: y was not a number", i + 1))?;
        tree.insert(Point2D::new(x, y))
            .with_context(|| format!("line {}: point ({x}, {y}) rejected", i + 1))?;
    }

    println!("size = {}", tree.size());

    let start = Instant::now();
    let query = Point2D::new(0.81, 0.30);
    let nearest = tree.nearest(&query).context("tree has no points to query")?;
    println!(
        "Nearest to (0.81, 0.30): ({}, {}) ({}s)",
        nearest.x,
        nearest.y,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_puzzle(path: &str) -> Result<()> {
    let board = read_board(path)?;
    let solver = PuzzleSolver::solve(board, Priority::Manhattan);

    println!(
        "SOLVED = {}  MOVES = {}",
        solver.is_solvable(),
        solver.moves()
    );
    if let Some(solution) = solver.solution() {
        for board in solution {
            print!("{board}");
        }
    }
    Ok(())
}

fn read_board(path: &str) -> Result<Board> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading puzzle input file {}", Path::new(path).display()))?;
    let mut lines = contents.lines();
    let n: usize = lines
        .next()
        .context("missing board dimension on line 1")?
        .trim()
        .parse()
        .context("board dimension on line 1 was not an integer")?;

    let mut tiles = Vec::with_capacity(n);
    for (i, line) in lines.take(n).enumerate() {
        let row: Result<Vec<i32>, _> = line.split_whitespace().map(str::parse::<i32>).collect();
        let row = row.with_context(|| format!("line {}: row was not all integers", i + 2))?;
        tiles.push(row);
    }
    ensure!(
        tiles.len() == n,
        "expected {n} rows but file only had {}",
        tiles.len()
    );

    Board::new(tiles).map_err(anyhow::Error::from)
}
