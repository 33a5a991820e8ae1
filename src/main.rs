//! CLI for maze generation

use std::path::PathBuf;

use a_maze_ing::{export, Algorithm, MazeConfig, MazeGenerator};
use clap::Parser;
use log::{info, LevelFilter};

/// Generate a maze around the 42 pattern and export it in hex format
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Spanning tree algorithm, `dfs` or `bfs`. Overrides `ALGORITHM` in the config.
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Print the export to stdout instead of writing `OUTPUT_FILE`
    #[arg(long)]
    stdout: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file
    config: PathBuf,
}

/// Read configuration, generate and export the maze
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let config = MazeConfig::from_file(&args.config)?;
    let algorithm = args.algorithm.unwrap_or(config.algorithm);

    let mut maze = MazeGenerator::new(&config)?;
    maze.generate(algorithm)?;

    if args.stdout {
        print!("{}", export::encode_maze(&maze));
        return Ok(());
    }

    export::write_export(&config.output_file, &maze)?;
    info!("Maze written to {}", config.output_file.display());

    let steps = maze.solve().len() - 1;
    println!(
        "Generated {}x{} maze with {algorithm}. The shortest path is {steps} steps.",
        config.width, config.height
    );
    Ok(())
}
