//! Maze generation

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::MazeConfig;
use crate::grid::Grid;
use crate::pattern::Pattern;
use crate::{solver, Endpoint, MazeError, Point};

/// Spanning tree construction strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Recursive backtracker; long winding corridors
    #[default]
    DepthFirst,
    /// Queue based expansion; short corridors, lots of branching
    BreadthFirst,
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" | "depthfirst" => Ok(Algorithm::DepthFirst),
            "bfs" | "breadth-first" | "breadthfirst" => Ok(Algorithm::BreadthFirst),
            _ => Err(MazeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::DepthFirst => write!(f, "dfs"),
            Algorithm::BreadthFirst => write!(f, "bfs"),
        }
    }
}

/// Maze generator owning the grid, the glyph placement and the random stream.
pub struct MazeGenerator {
    random: StdRng,
    grid: Grid,
    pattern: Pattern,
    entry: Point,
    exit: Point,
    perfect: bool,
}

impl MazeGenerator {
    /// Prepare an empty, fully walled maze for `config`
    ///
    /// Fails if the glyph does not fit, or if entry or exit lie outside the
    /// grid or on the glyph. Nothing is carved yet.
    pub fn new(config: &MazeConfig) -> Result<Self, MazeError> {
        let (width, height) = (config.width, config.height);
        let pattern =
            Pattern::place(width, height).ok_or(MazeError::TooSmall { width, height })?;

        let grid = Grid::new(width, height);

        for (which, point) in [
            (Endpoint::Entry, config.entry),
            (Endpoint::Exit, config.exit),
        ] {
            if !grid.contains(point) {
                return Err(MazeError::OutOfBounds { which, point });
            }
            if pattern.is_blocked(point) {
                return Err(MazeError::OnPattern { which, point });
            }
        }

        Ok(Self {
            random: if let Some(state) = config.seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
            grid,
            pattern,
            entry: config.entry,
            exit: config.exit,
            perfect: config.perfect,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn entry(&self) -> Point {
        self.entry
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    /// Carve a new maze
    ///
    /// Starts from a fully walled grid every time, so this can be called
    /// again to re-generate. The random stream carries on from the previous
    /// call.
    pub fn generate(&mut self, algorithm: Algorithm) -> Result<(), MazeError> {
        debug!(
            "Generating {}x{} maze with {algorithm}, perfect={}",
            self.grid.width(),
            self.grid.height(),
            self.perfect
        );
        self.grid = Grid::new(self.grid.width(), self.grid.height());

        // Glyph cells count as visited so no tree edge ever reaches them
        for p in self.pattern.cells() {
            self.grid.mark_visited(*p);
        }

        match algorithm {
            Algorithm::DepthFirst => self.depth_first(),
            Algorithm::BreadthFirst => self.breadth_first(),
        }

        if !self.perfect {
            self.grid.reset_visited();
            self.add_loops();
        }

        if !self.pattern.permits_path(&self.grid, self.entry, self.exit) {
            return Err(MazeError::Unsolvable);
        }
        Ok(())
    }

    /// Recursive backtracker with an explicit stack
    fn depth_first(&mut self) {
        let mut stack = vec![self.entry];
        self.grid.mark_visited(self.entry);

        while let Some(&current) = stack.last() {
            let neighbors = self.grid.neighbors(current);
            if let Some(&(next, dir)) = neighbors.choose(&mut self.random) {
                self.grid.remove_wall(current, next, dir);
                self.grid.mark_visited(next);
                stack.push(next);
            } else {
                stack.pop();
            }
        }
    }

    /// Connect every unvisited neighbor of each dequeued cell, in random order
    fn breadth_first(&mut self) {
        let mut queue = VecDeque::from([self.entry]);
        self.grid.mark_visited(self.entry);

        while let Some(current) = queue.pop_front() {
            let mut neighbors = self.grid.neighbors(current);
            neighbors.shuffle(&mut self.random);
            for (next, dir) in neighbors {
                self.grid.remove_wall(current, next, dir);
                self.grid.mark_visited(next);
                queue.push_back(next);
            }
        }
    }

    /// Knock down extra walls to create loops
    ///
    /// Runs `height + width - 1` trials. Each trial picks a random cell off
    /// the glyph and opens one still-closed wall towards another cell off the
    /// glyph. A trial without such a wall is used up all the same.
    ///
    /// Returns the number of walls opened.
    fn add_loops(&mut self) -> usize {
        let (width, height) = (self.grid.width(), self.grid.height());
        let trials = if width < 2 || height < 2 {
            1
        } else {
            height + width - 1
        };

        let candidates: Vec<Point> = self
            .grid
            .points()
            .filter(|p| !self.pattern.is_blocked(*p))
            .collect();
        if candidates.is_empty() {
            return 0;
        }

        let mut opened = 0;
        for _ in 0..trials {
            let current = candidates[self.random.gen_range(0..candidates.len())];
            let closed: Vec<_> = self
                .grid
                .adjacent(current)
                .filter(|(n, dir)| {
                    self.grid.cell(current).has_wall(*dir) && !self.pattern.is_blocked(*n)
                })
                .collect();
            if let Some(&(next, dir)) = closed.choose(&mut self.random) {
                self.grid.remove_wall(current, next, dir);
                opened += 1;
            }
        }
        debug!("Opened {opened} extra passages in {trials} trials");
        opened
    }

    /// Shortest route from entry to exit, both included
    pub fn solve(&self) -> Vec<Point> {
        solver::shortest_path(&self.grid, self.entry, self.exit)
    }

    /// Shortest route from entry to exit as a compass string
    pub fn directions(&self) -> String {
        solver::directions(&self.solve())
    }
}
