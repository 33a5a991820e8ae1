//! Rectangular cell grid with per-cell wall flags

use std::fmt;

use crate::Point;

/// Compass direction of a cell edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Fixed enumeration order used by neighbor lookup and search expansion
    pub const ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Bit of this wall in the exported hex nibble
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }

    /// Single letter used in direction strings
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::West => 'W',
            Direction::East => 'E',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            'E' => Some(Direction::East),
            _ => None,
        }
    }

    /// Step one cell from `p`, staying inside a `width` x `height` area
    pub fn step(self, p: Point, width: usize, height: usize) -> Option<Point> {
        let (x, y) = (p.x, p.y);
        match self {
            Direction::North if y > 0 => Some(Point::new(x, y - 1)),
            Direction::South if y + 1 < height => Some(Point::new(x, y + 1)),
            Direction::West if x > 0 => Some(Point::new(x - 1, y)),
            Direction::East if x + 1 < width => Some(Point::new(x + 1, y)),
            _ => None,
        }
    }
}

/// Single maze square
///
/// Wall flags are `true` when the wall is present. They can only be cleared
/// through [Grid::remove_wall], which keeps both sides of an edge in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
    /// Scratch flag of the current generation pass
    visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            north: true,
            east: true,
            south: true,
            west: true,
            visited: false,
        }
    }
}

impl Cell {
    /// Is the wall on side `dir` present
    pub fn has_wall(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Wall state as a nibble: west=8, south=4, east=2, north=1
    pub fn walls(&self) -> u8 {
        Direction::ORDER
            .iter()
            .filter(|d| self.has_wall(**d))
            .map(|d| d.bit())
            .sum()
    }

    /// Wall state as one uppercase hex digit
    pub fn hex_digit(&self) -> char {
        // walls() is at most 15
        char::from_digit(self.walls() as u32, 16)
            .unwrap_or('F')
            .to_ascii_uppercase()
    }

    fn from_walls(walls: u8) -> Self {
        Self {
            north: walls & Direction::North.bit() != 0,
            east: walls & Direction::East.bit() != 0,
            south: walls & Direction::South.bit() != 0,
            west: walls & Direction::West.bit() != 0,
            visited: false,
        }
    }

    fn clear_wall(&mut self, dir: Direction) {
        match dir {
            Direction::North => self.north = false,
            Direction::East => self.east = false,
            Direction::South => self.south = false,
            Direction::West => self.west = false,
        }
    }
}

/// `height` x `width` cells, indexed `[y][x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Fully walled grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: (0..height)
                .map(|_| (0..width).map(|_| Cell::default()).collect())
                .collect(),
        }
    }

    /// Build grid from wall nibbles, one row per `y`.
    ///
    /// Rows must all have the same length. Wall agreement between neighbors
    /// is not checked here; see [Self::wall_mismatch].
    pub fn from_walls(rows: &[Vec<u8>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        Self {
            width,
            height,
            cells: rows
                .iter()
                .map(|row| row.iter().map(|w| Cell::from_walls(*w)).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    pub fn cell(&self, p: Point) -> &Cell {
        &self.cells[p.y][p.x]
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|row| row.as_slice())
    }

    /// All coordinates in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// In-bounds neighbor of `p` in direction `dir`
    pub fn step(&self, p: Point, dir: Direction) -> Option<Point> {
        dir.step(p, self.width, self.height)
    }

    /// Every in-bounds neighbor of `p`, tagged with the connecting direction
    ///
    /// Order is north, south, west, east.
    pub fn adjacent(&self, p: Point) -> impl Iterator<Item = (Point, Direction)> + '_ {
        Direction::ORDER
            .into_iter()
            .filter_map(move |dir| self.step(p, dir).map(|n| (n, dir)))
    }

    /// Neighbors of `p` not yet visited in the current pass
    ///
    /// Order is north, south, west, east.
    pub fn neighbors(&self, p: Point) -> Vec<(Point, Direction)> {
        self.adjacent(p)
            .filter(|(n, _)| !self.is_visited(*n))
            .collect()
    }

    /// Is there an open passage from `p` towards `dir`
    pub fn is_open(&self, p: Point, dir: Direction) -> bool {
        self.step(p, dir).is_some() && !self.cell(p).has_wall(dir)
    }

    /// Open the passage between `a` and its neighbor `b`, which lies in
    /// direction `dir` from `a`. Both sides of the edge are cleared.
    pub fn remove_wall(&mut self, a: Point, b: Point, dir: Direction) {
        debug_assert_eq!(self.step(a, dir), Some(b), "{b} is not {dir:?} of {a}");
        self.cells[a.y][a.x].clear_wall(dir);
        self.cells[b.y][b.x].clear_wall(dir.opposite());
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.cell(p).visited
    }

    pub fn mark_visited(&mut self, p: Point) {
        self.cells[p.y][p.x].visited = true;
    }

    /// Clear all visited flags
    pub fn reset_visited(&mut self) {
        self.cells
            .iter_mut()
            .flatten()
            .for_each(|cell| cell.visited = false);
    }

    /// Number of open edges between adjacent cells
    pub fn open_passages(&self) -> usize {
        self.points()
            .map(|p| {
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter(|dir| self.is_open(p, *dir))
                    .count()
            })
            .sum()
    }

    /// First adjacent pair whose shared wall flags disagree, if any
    pub fn wall_mismatch(&self) -> Option<(Point, Direction)> {
        self.points().find_map(|p| {
            [Direction::South, Direction::East]
                .into_iter()
                .find(|dir| {
                    self.step(p, *dir).is_some_and(|n| {
                        self.cell(p).has_wall(*dir) != self.cell(n).has_wall(dir.opposite())
                    })
                })
                .map(|dir| (p, dir))
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert!(grid.points().all(|p| grid.cell(p).walls() == 15));
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn neighbors_in_fixed_order() {
        let grid = Grid::new(3, 3);
        let dirs: Vec<_> = grid
            .neighbors(Point::new(1, 1))
            .into_iter()
            .map(|(_, d)| d)
            .collect();
        assert_eq!(dirs, Direction::ORDER.to_vec());

        let corner = grid.neighbors(Point::new(0, 0));
        assert_eq!(
            corner,
            vec![
                (Point::new(0, 1), Direction::South),
                (Point::new(1, 0), Direction::East)
            ]
        );
    }

    #[test]
    fn neighbors_skip_visited() {
        let mut grid = Grid::new(3, 3);
        grid.mark_visited(Point::new(1, 0));
        grid.mark_visited(Point::new(2, 1));
        let found: Vec<_> = grid
            .neighbors(Point::new(1, 1))
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(found, vec![Point::new(1, 2), Point::new(0, 1)]);

        grid.reset_visited();
        assert_eq!(grid.neighbors(Point::new(1, 1)).len(), 4);
    }

    #[test]
    fn remove_wall_clears_both_sides() {
        let mut grid = Grid::new(2, 2);
        grid.remove_wall(Point::new(0, 0), Point::new(1, 0), Direction::East);
        assert!(!grid.cell(Point::new(0, 0)).has_wall(Direction::East));
        assert!(!grid.cell(Point::new(1, 0)).has_wall(Direction::West));
        assert!(grid.is_open(Point::new(1, 0), Direction::West));

        grid.remove_wall(Point::new(1, 1), Point::new(1, 0), Direction::North);
        assert!(!grid.cell(Point::new(1, 0)).has_wall(Direction::South));
        assert_eq!(grid.open_passages(), 2);
        assert_eq!(grid.wall_mismatch(), None);
    }

    #[test]
    fn border_is_never_open() {
        let mut grid = Grid::new(2, 1);
        grid.remove_wall(Point::new(0, 0), Point::new(1, 0), Direction::East);
        assert!(!grid.is_open(Point::new(1, 0), Direction::East));
        assert!(!grid.is_open(Point::new(0, 0), Direction::North));
    }

    #[test]
    fn hex_digit_bit_order() {
        let mut grid = Grid::new(3, 1);
        grid.remove_wall(Point::new(0, 0), Point::new(1, 0), Direction::East);
        // west, south, north remain
        assert_eq!(grid.cell(Point::new(0, 0)).hex_digit(), 'D');
        // south, north remain
        assert_eq!(grid.cell(Point::new(1, 0)).hex_digit(), '5');
        assert_eq!(grid.cell(Point::new(2, 0)).hex_digit(), 'F');
    }

    #[test]
    fn detect_wall_mismatch() {
        let grid = Grid::from_walls(&[vec![0xD, 0x5], vec![0xF, 0xE]]);
        assert_eq!(grid.wall_mismatch(), Some((Point::new(1, 0), Direction::South)));

        let grid = Grid::from_walls(&[vec![0xD, 0x7]]);
        assert_eq!(grid.wall_mismatch(), None);
    }

    #[test]
    fn letters_round_trip() {
        for dir in Direction::ORDER {
            assert_eq!(Direction::from_letter(dir.letter()), Some(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::from_letter('x'), None);
    }
}
