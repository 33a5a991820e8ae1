//! CLI for solving exported mazes

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use a_maze_ing::{export, solver};
use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, LevelFilter};

/// Find the shortest path through an exported maze and check the stored one
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Cannot read {}", args.file.display()))?
    };
    let maze = export::parse_export(&text)?;

    let path = solver::shortest_path(&maze.grid, maze.entry, maze.exit);
    if path.last() != Some(&maze.exit) {
        bail!("No path from {} to {}", maze.entry, maze.exit);
    }
    let directions = solver::directions(&path);
    debug!("Solved path: {directions}");

    let stored = solver::follow(maze.entry, &maze.directions)
        .filter(|p| solver::is_walkable(&maze.grid, p) && p.last() == Some(&maze.exit))
        .context("Stored path does not lead from entry to exit")?;
    if stored.len() != path.len() {
        bail!(
            "Stored path has {} steps, the shortest is {}",
            stored.len() - 1,
            path.len() - 1
        );
    }

    println!("The shortest path is {} steps: {directions}", path.len() - 1);
    Ok(())
}
