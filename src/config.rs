//! Maze parameters and the `KEY=VALUE` configuration file
//!
//! ```text
//! # comment
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=42
//! ALGORITHM=bfs
//! ```
//!
//! `SEED` (integer or `None`) and `ALGORITHM` (`dfs` or `bfs`) are optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};

use crate::maze_generator::Algorithm;
use crate::Point;

/// Parameters of one maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub entry: Point,
    pub exit: Point,
    /// Spanning tree only, no loops
    pub perfect: bool,
    /// Seed of the random stream; `None` draws from entropy
    pub seed: Option<u64>,
    /// Where the hex export is written
    pub output_file: PathBuf,
    pub algorithm: Algorithm,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            entry: Point::new(0, 0),
            exit: Point::new(19, 14),
            perfect: true,
            seed: None,
            output_file: PathBuf::from("maze.txt"),
            algorithm: Algorithm::default(),
        }
    }
}

impl MazeConfig {
    const REQUIRED: [&'static str; 6] = [
        "WIDTH",
        "HEIGHT",
        "ENTRY",
        "EXIT",
        "OUTPUT_FILE",
        "PERFECT",
    ];

    /// Read configuration file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration text
    ///
    /// Blank lines and lines starting with `#` are skipped. Checks that entry
    /// and exit are distinct and inside the grid; fitting the 42 pattern is
    /// left to [crate::MazeGenerator::new].
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut width = None;
        let mut height = None;
        let mut entry = None;
        let mut exit = None;
        let mut perfect = None;
        let mut output_file = None;
        let mut seed = None;
        let mut algorithm = Algorithm::default();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .ok_or_else(|| anyhow!("Invalid line in config: `{line}`, expected KEY=VALUE"))?;

            let parsed = match key {
                "WIDTH" => Self::parse_size(value).map(|v| width = Some(v)),
                "HEIGHT" => Self::parse_size(value).map(|v| height = Some(v)),
                "ENTRY" => Self::parse_point(value).map(|v| entry = Some(v)),
                "EXIT" => Self::parse_point(value).map(|v| exit = Some(v)),
                "PERFECT" => Self::parse_bool(value).map(|v| perfect = Some(v)),
                "SEED" => Self::parse_seed(value).map(|v| seed = v),
                "OUTPUT_FILE" if !value.is_empty() => {
                    output_file = Some(PathBuf::from(value));
                    Ok(())
                }
                "OUTPUT_FILE" => Err(anyhow!("path is empty")),
                "ALGORITHM" => value
                    .parse::<Algorithm>()
                    .map(|v| algorithm = v)
                    .map_err(anyhow::Error::from),
                _ => Err(anyhow!("unknown key `{key}`")),
            };
            parsed.with_context(|| format!("Invalid line in config: `{line}`"))?;
        }

        let missing: Vec<&str> = Self::REQUIRED
            .into_iter()
            .zip([
                width.is_none(),
                height.is_none(),
                entry.is_none(),
                exit.is_none(),
                output_file.is_none(),
                perfect.is_none(),
            ])
            .filter_map(|(key, absent)| absent.then_some(key))
            .collect();
        if !missing.is_empty() {
            bail!("Missing keys in config: {}", missing.join(", "));
        }

        let config = MazeConfig {
            width: width.unwrap_or_default(),
            height: height.unwrap_or_default(),
            entry: entry.unwrap_or_default(),
            exit: exit.unwrap_or_default(),
            perfect: perfect.unwrap_or_default(),
            seed,
            output_file: output_file.unwrap_or_default(),
            algorithm,
        };
        config.validate()?;
        Ok(config)
    }

    /// Entry and exit must be distinct cells inside the grid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.entry == self.exit {
            bail!("ENTRY and EXIT must be different coordinates");
        }
        for (key, p) in [("ENTRY", self.entry), ("EXIT", self.exit)] {
            if p.x >= self.width || p.y >= self.height {
                bail!(
                    "{key} {p} exceeds the {}x{} maze",
                    self.width,
                    self.height
                );
            }
        }
        Ok(())
    }

    fn parse_size(value: &str) -> anyhow::Result<usize> {
        value
            .parse()
            .with_context(|| format!("expected a non-negative integer, got `{value}`"))
    }

    fn parse_point(value: &str) -> anyhow::Result<Point> {
        let (x, y) = value
            .split_once(',')
            .ok_or_else(|| anyhow!("expected x,y got `{value}`"))?;
        Ok(Point::new(Self::parse_size(x.trim())?, Self::parse_size(y.trim())?))
    }

    fn parse_bool(value: &str) -> anyhow::Result<bool> {
        match value.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => bail!("expected true or false got `{value}`"),
        }
    }

    /// Negative seeds wrap into the `u64` range
    fn parse_seed(value: &str) -> anyhow::Result<Option<u64>> {
        if value == "None" {
            return Ok(None);
        }
        if let Ok(seed) = value.parse::<u64>() {
            return Ok(Some(seed));
        }
        value
            .parse::<i64>()
            .map(|seed| Some(seed as u64))
            .with_context(|| format!("SEED must be None or an integer, got `{value}`"))
    }
}
