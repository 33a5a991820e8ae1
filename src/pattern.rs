//! Placement of the fixed "42" glyph
//!
//! The glyph occupies a 7x5 box centered in the grid. Its cells are closed
//! off before generation starts and no passage is ever carved into them.

use std::collections::VecDeque;

use crate::grid::{Direction, Grid};
use crate::Point;

/// Blocked cells of the glyph for one grid size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    anchor: Point,
    cells: Vec<Point>,
    /// `blocked[y][x]`, sized like the grid
    blocked: Vec<Vec<bool>>,
}

impl Pattern {
    /// Glyph bounding box
    pub const WIDTH: usize = 7;
    pub const HEIGHT: usize = 5;

    /// Smallest grid that fits the glyph with a margin around it
    pub const MIN_WIDTH: usize = 11;
    pub const MIN_HEIGHT: usize = 8;

    /// (dx, dy) offsets from the top-left anchor
    const OFFSETS: [(usize, usize); 20] = [
        // 4
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 2),
        (2, 0),
        (2, 1),
        (2, 2),
        (2, 3),
        (2, 4),
        // 2
        (4, 0),
        (5, 0),
        (6, 0),
        (6, 1),
        (4, 2),
        (5, 2),
        (6, 2),
        (4, 3),
        (4, 4),
        (5, 4),
        (6, 4),
    ];

    /// Center the glyph in a `width` x `height` grid
    ///
    /// Returns `None` if the grid is below [Self::MIN_WIDTH] x
    /// [Self::MIN_HEIGHT].
    pub fn place(width: usize, height: usize) -> Option<Self> {
        if width < Self::MIN_WIDTH || height < Self::MIN_HEIGHT {
            return None;
        }
        let anchor = Point::new((width - Self::WIDTH) / 2, (height - Self::HEIGHT) / 2);
        let cells: Vec<Point> = Self::OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(anchor.x + dx, anchor.y + dy))
            .collect();

        let mut blocked = vec![vec![false; width]; height];
        for p in &cells {
            blocked[p.y][p.x] = true;
        }

        Some(Self {
            anchor,
            cells,
            blocked,
        })
    }

    /// Top-left corner of the glyph box
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Glyph cells in fixed order
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn is_blocked(&self, p: Point) -> bool {
        self.blocked
            .get(p.y)
            .and_then(|row| row.get(p.x))
            .copied()
            .unwrap_or(false)
    }

    /// Can `exit` be reached from `entry` through open passages without
    /// stepping on the glyph
    pub fn permits_path(&self, grid: &Grid, entry: Point, exit: Point) -> bool {
        if self.is_blocked(entry) || self.is_blocked(exit) {
            return false;
        }
        let mut seen = vec![vec![false; grid.width()]; grid.height()];
        let mut queue = VecDeque::from([entry]);
        seen[entry.y][entry.x] = true;

        while let Some(current) = queue.pop_front() {
            if current == exit {
                return true;
            }
            for dir in Direction::ORDER {
                if !grid.is_open(current, dir) {
                    continue;
                }
                if let Some(next) = grid.step(current, dir) {
                    if !seen[next.y][next.x] && !self.is_blocked(next) {
                        seen[next.y][next.x] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn render(pattern: &Pattern, width: usize, height: usize) -> String {
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        if pattern.is_blocked(Point::new(x, y)) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .join("")
            })
            .join("\n")
    }

    #[test]
    fn glyph_centered_in_minimum_grid() {
        let pattern = Pattern::place(11, 8).unwrap();
        assert_eq!(pattern.anchor(), Point::new(2, 1));
        assert_eq!(pattern.cells().len(), 20);
        assert_eq!(
            render(&pattern, 11, 8),
            "
...........
..#.#.###..
..#.#...#..
..###.###..
....#.#....
....#.###..
...........
..........."
                .trim()
        );
    }

    #[test]
    fn anchor_uses_integer_division() {
        let pattern = Pattern::place(20, 15).unwrap();
        assert_eq!(pattern.anchor(), Point::new(6, 5));
        assert!(pattern.is_blocked(Point::new(6, 5)));
        assert!(pattern.is_blocked(Point::new(12, 9)));
        assert!(!pattern.is_blocked(Point::new(7, 5)));
    }

    #[test]
    fn too_small_grid_is_not_placeable() {
        assert!(Pattern::place(10, 8).is_none());
        assert!(Pattern::place(11, 7).is_none());
        assert!(Pattern::place(11, 8).is_some());
    }

    #[test]
    fn out_of_bounds_is_not_blocked() {
        let pattern = Pattern::place(11, 8).unwrap();
        assert!(!pattern.is_blocked(Point::new(50, 2)));
        assert!(!pattern.is_blocked(Point::new(2, 50)));
    }

    #[test]
    fn path_needs_open_passages() {
        let pattern = Pattern::place(11, 8).unwrap();
        let mut grid = Grid::new(11, 8);
        let entry = Point::new(0, 0);
        let exit = Point::new(3, 0);
        assert!(!pattern.permits_path(&grid, entry, exit));

        for x in 0..3 {
            grid.remove_wall(Point::new(x, 0), Point::new(x + 1, 0), Direction::East);
        }
        assert!(pattern.permits_path(&grid, entry, exit));
    }

    #[test]
    fn path_may_not_cross_glyph() {
        let pattern = Pattern::place(11, 8).unwrap();
        let mut grid = Grid::new(11, 8);
        // Corridor along row 1 runs through the glyph at (2, 1)
        for x in 0..4 {
            grid.remove_wall(Point::new(x, 1), Point::new(x + 1, 1), Direction::East);
        }
        assert!(!pattern.permits_path(&grid, Point::new(0, 1), Point::new(4, 0)));
        assert!(!pattern.permits_path(&grid, Point::new(0, 1), Point::new(3, 1)));
        assert!(pattern.permits_path(&grid, Point::new(0, 1), Point::new(1, 1)));
    }
}
