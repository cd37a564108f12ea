//! Command line interface.

use crate::config::{Config, DEFAULT_CONFIG_PATH};

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Randomly sample and download ranked beatmap sets.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Number of beatmap sets to collect.
    #[arg(short = 'n', long)]
    pub target: Option<usize>,

    /// Number of parallel downloaders.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Lowest star rating, inclusive.
    #[arg(long)]
    pub min_stars: Option<f64>,

    /// Highest star rating, inclusive.
    #[arg(long)]
    pub max_stars: Option<f64>,

    /// Game mode code (0 osu!, 1 taiko, 2 catch, 3 mania).
    #[arg(short, long)]
    pub mode: Option<u8>,

    /// Directory receiving the .osz archives.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop collecting after this many attempts.
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Seed for reproducible sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// More logging, repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Overwrite the configuration with the values given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(target) = self.target {
            config.target_count = target;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(min) = self.min_stars {
            config.star_rating_min = min;
        }
        if let Some(max) = self.max_stars {
            config.star_rating_max = max;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(ref output) = self.output {
            config.songs_folder = output.clone();
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = Some(max_attempts);
        }
    }
}
