//! Hexadecimal maze file
//!
//! One hex digit per cell, one line per row. Each digit holds the walls of
//! the cell (west=8, south=4, east=2, north=1, bit set when closed). After a
//! blank line follow the entry `x,y`, the exit `x,y` and the shortest path as
//! a string of `N`, `E`, `S`, `W`.
//!
//! ```text
//! D3F
//! FC7
//!
//! 0,0
//! 2,1
//! ESE
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use itertools::Itertools;

use crate::grid::Grid;
use crate::maze_generator::MazeGenerator;
use crate::Point;

/// Contents of an exported maze file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMaze {
    pub grid: Grid,
    pub entry: Point,
    pub exit: Point,
    pub directions: String,
}

/// Render the export text
pub fn encode(grid: &Grid, entry: Point, exit: Point, directions: &str) -> String {
    let rows = grid
        .rows()
        .map(|row| row.iter().map(|cell| cell.hex_digit()).join(""))
        .join("\n");
    format!(
        "{rows}\n\n{},{}\n{},{}\n{directions}\n",
        entry.x, entry.y, exit.x, exit.y
    )
}

/// Solve the generated maze and render the export text
pub fn encode_maze(maze: &MazeGenerator) -> String {
    encode(maze.grid(), maze.entry(), maze.exit(), &maze.directions())
}

/// Write the export text of `maze` to `path`
pub fn write_export(path: &Path, maze: &MazeGenerator) -> anyhow::Result<()> {
    fs::write(path, encode_maze(maze))
        .with_context(|| format!("Cannot write maze to {}", path.display()))
}

/// Read an export text back
///
/// Fails on non-hex digits, ragged rows, walls that disagree between
/// neighbors, or entry/exit outside the grid.
pub fn parse_export(text: &str) -> anyhow::Result<ExportedMaze> {
    let mut lines = text.lines().map(str::trim);

    let mut rows: Vec<Vec<u8>> = Vec::new();
    for (y, line) in lines.by_ref().take_while(|l| !l.is_empty()).enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(x, c)| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or_else(|| anyhow!("Unexpected character `{c}` at x={x}, y={y}"))
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                bail!(
                    "Row {y} has {} cells, expected {}",
                    row.len(),
                    first.len()
                );
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("No maze rows found");
    }

    let grid = Grid::from_walls(&rows);
    if let Some((p, dir)) = grid.wall_mismatch() {
        bail!("Wall {dir} of cell {p} disagrees with its neighbor");
    }

    let mut point = |name: &str| -> anyhow::Result<Point> {
        let line = lines
            .next()
            .ok_or_else(|| anyhow!("Missing {name} coordinates"))?;
        let (x, y) = line
            .split_once(',')
            .ok_or_else(|| anyhow!("Invalid {name} coordinates `{line}`"))?;
        let p = Point::new(
            x.trim()
                .parse()
                .with_context(|| format!("Invalid {name} x `{x}`"))?,
            y.trim()
                .parse()
                .with_context(|| format!("Invalid {name} y `{y}`"))?,
        );
        if !grid.contains(p) {
            bail!("{name} {p} is outside the maze");
        }
        Ok(p)
    };
    let entry = point("entry")?;
    let exit = point("exit")?;
    let directions = lines.next().unwrap_or_default().to_string();

    Ok(ExportedMaze {
        grid,
        entry,
        exit,
        directions,
    })
}
