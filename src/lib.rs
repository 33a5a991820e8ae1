//! Generate rectangular mazes around a fixed "42" glyph and find the way out
//!
//! A maze is a [Grid] of cells with four walls each. [MazeGenerator] carves
//! a spanning tree into it, either depth-first or breadth-first, never
//! touching the cells of the centered [Pattern]. Imperfect mazes get a few
//! extra walls knocked down afterwards. The shortest route from entry to exit
//! is found with a breadth-first search and written out as a compass string.
//!
//! # Examples
//! ```
//! use a_maze_ing::{Algorithm, MazeConfig, MazeGenerator, Point};
//!
//! let config = MazeConfig {
//!     width: 15,
//!     height: 10,
//!     entry: Point::new(0, 0),
//!     exit: Point::new(14, 9),
//!     perfect: true,
//!     seed: Some(7),
//!     ..MazeConfig::default()
//! };
//! let mut maze = MazeGenerator::new(&config).unwrap();
//! maze.generate(Algorithm::DepthFirst).unwrap();
//!
//! let path = maze.solve();
//! assert_eq!(path.first(), Some(&config.entry));
//! assert_eq!(path.last(), Some(&config.exit));
//! println!("{}", maze.directions());
//! ```

use std::fmt;

pub mod config;
pub mod export;
pub mod grid;
pub mod maze_generator;
pub mod pattern;
pub mod solver;

pub use config::MazeConfig;
pub use grid::{Cell, Direction, Grid};
pub use maze_generator::{Algorithm, MazeGenerator};
pub use pattern::Pattern;

/// Location in the maze
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which of the two designated cells an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Entry,
    Exit,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Entry => write!(f, "entry"),
            Endpoint::Exit => write!(f, "exit"),
        }
    }
}

/// Errors raised while setting up or generating a maze
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// Grid cannot hold the glyph and its margin
    #[error("maze of {width}x{height} is too small for the 42 pattern (minimum 11x8)")]
    TooSmall { width: usize, height: usize },
    /// Entry or exit lies on a glyph cell
    #[error("{which} {point} lies on the 42 pattern")]
    OnPattern { which: Endpoint, point: Point },
    /// Entry or exit lies outside the grid
    #[error("{which} {point} is outside the maze")]
    OutOfBounds { which: Endpoint, point: Point },
    /// No route from entry to exit after generation
    #[error("42 pattern blocks all solutions")]
    Unsolvable,
    #[error("unknown algorithm `{0}`, expected `dfs` or `bfs`")]
    UnknownAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use crate::{Endpoint, MazeError, Point};

    #[test]
    fn error_messages() {
        assert_eq!(
            MazeError::TooSmall {
                width: 10,
                height: 8
            }
            .to_string(),
            "maze of 10x8 is too small for the 42 pattern (minimum 11x8)"
        );
        assert_eq!(
            MazeError::OnPattern {
                which: Endpoint::Entry,
                point: Point::new(2, 1)
            }
            .to_string(),
            "entry (2, 1) lies on the 42 pattern"
        );
    }
}
