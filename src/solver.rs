//! Shortest path search over open passages

use std::collections::{HashMap, VecDeque};

use itertools::Itertools;
use log::debug;

use crate::grid::{Direction, Grid};
use crate::Point;

/// Breadth-first search from `entry` to `exit`
///
/// Returns the route with both ends included. If `exit` cannot be reached
/// the result holds `entry` alone.
pub fn shortest_path(grid: &Grid, entry: Point, exit: Point) -> Vec<Point> {
    let mut visited = vec![vec![false; grid.width()]; grid.height()];
    let mut parents: HashMap<Point, Point> = HashMap::new();
    let mut queue = VecDeque::from([entry]);
    visited[entry.y][entry.x] = true;

    while let Some(current) = queue.pop_front() {
        if current == exit {
            break;
        }
        for dir in Direction::ORDER {
            if !grid.is_open(current, dir) {
                continue;
            }
            if let Some(next) = grid.step(current, dir) {
                if !visited[next.y][next.x] {
                    visited[next.y][next.x] = true;
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
    }

    let mut path = vec![exit];
    let mut current = exit;
    while let Some(&prev) = parents.get(&current) {
        path.push(prev);
        current = prev;
    }
    if current != entry {
        debug!("No route from {entry} to {exit}");
        return vec![entry];
    }
    path.reverse();
    path
}

/// Compass letter of every step along `path`
pub fn directions(path: &[Point]) -> String {
    path.iter()
        .tuple_windows()
        .filter_map(|(a, b)| {
            if b.x > a.x {
                Some(Direction::East)
            } else if b.x < a.x {
                Some(Direction::West)
            } else if b.y > a.y {
                Some(Direction::South)
            } else if b.y < a.y {
                Some(Direction::North)
            } else {
                None
            }
        })
        .map(Direction::letter)
        .collect()
}

/// Replay a compass string from `start`
///
/// Returns `None` on an unknown letter or a step that would leave the first
/// quadrant. Walls are not consulted.
pub fn follow(start: Point, directions: &str) -> Option<Vec<Point>> {
    let mut path = vec![start];
    let mut current = start;
    for c in directions.chars() {
        let dir = Direction::from_letter(c)?;
        current = dir.step(current, usize::MAX, usize::MAX)?;
        path.push(current);
    }
    Some(path)
}

/// Does `path` only move through open passages of `grid`
pub fn is_walkable(grid: &Grid, path: &[Point]) -> bool {
    path.iter().all(|p| grid.contains(*p))
        && path.iter().tuple_windows().all(|(a, b)| {
            grid.adjacent(*a)
                .any(|(n, dir)| n == *b && grid.is_open(*a, dir))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Open a corridor along `cells`, each step between neighbors
    fn carve(grid: &mut Grid, cells: &[Point]) {
        for (a, b) in cells.iter().tuple_windows() {
            let (_, dir) = grid.adjacent(*a).find(|(n, _)| n == b).unwrap();
            grid.remove_wall(*a, *b, dir);
        }
    }

    fn pts(coords: &[(usize, usize)]) -> Vec<Point> {
        coords.iter().map(|(x, y)| Point::new(*x, *y)).collect()
    }

    #[test]
    fn follow_single_corridor() {
        let mut grid = Grid::new(3, 3);
        let route = pts(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2)]);
        carve(&mut grid, &route);

        let path = shortest_path(&grid, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(path, route);
        assert_eq!(directions(&path), "ESWSEE");
    }

    #[test]
    fn pick_shorter_of_two_routes() {
        let mut grid = Grid::new(3, 3);
        carve(&mut grid, &pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
        carve(&mut grid, &pts(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]));
        carve(&mut grid, &pts(&[(1, 0), (1, 1), (1, 2)]));

        let path = shortest_path(&grid, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(path.len(), 5);
        // Southward expansion comes before eastward
        assert_eq!(directions(&path), "SSEE");
    }

    #[test]
    fn unreachable_exit_gives_entry_only() {
        let mut grid = Grid::new(3, 1);
        carve(&mut grid, &pts(&[(0, 0), (1, 0)]));
        let path = shortest_path(&grid, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(path, vec![Point::new(0, 0)]);
        assert_eq!(directions(&path), "");
    }

    #[test]
    fn entry_equals_exit() {
        let grid = Grid::new(2, 2);
        let path = shortest_path(&grid, Point::new(1, 1), Point::new(1, 1));
        assert_eq!(path, vec![Point::new(1, 1)]);
    }

    #[test]
    fn all_four_letters() {
        let path = pts(&[(1, 1), (1, 0), (2, 0), (2, 1), (1, 1)]);
        assert_eq!(directions(&path), "NESW");
    }

    #[test]
    fn directions_replay_to_same_path() {
        let mut grid = Grid::new(4, 4);
        let route = pts(&[
            (3, 0),
            (2, 0),
            (2, 1),
            (3, 1),
            (3, 2),
            (2, 2),
            (1, 2),
            (1, 1),
            (0, 1),
            (0, 2),
            (0, 3),
        ]);
        carve(&mut grid, &route);

        let path = shortest_path(&grid, route[0], route[route.len() - 1]);
        let dirs = directions(&path);
        assert_eq!(dirs.len(), path.len() - 1);
        assert_eq!(follow(path[0], &dirs), Some(path.clone()));
        assert!(is_walkable(&grid, &path));
    }

    #[test]
    fn follow_rejects_bad_input() {
        assert_eq!(follow(Point::new(0, 0), "N"), None);
        assert_eq!(follow(Point::new(1, 1), "NX"), None);
        assert_eq!(
            follow(Point::new(1, 1), "ES"),
            Some(pts(&[(1, 1), (2, 1), (2, 2)]))
        );
    }

    #[test]
    fn walkable_needs_open_walls() {
        let mut grid = Grid::new(2, 2);
        carve(&mut grid, &pts(&[(0, 0), (1, 0)]));
        assert!(is_walkable(&grid, &pts(&[(0, 0), (1, 0)])));
        assert!(!is_walkable(&grid, &pts(&[(1, 0), (1, 1)])));
        assert!(!is_walkable(&grid, &pts(&[(0, 0), (1, 1)])));
        assert!(!is_walkable(&grid, &pts(&[(1, 0), (2, 0)])));
    }
}
