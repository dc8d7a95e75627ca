use std::path::PathBuf;

use clap::Parser;

/// Click to place points and watch each one get classified by its nearest neighbors.
#[derive(Parser)]
#[command(name = "knn-visualizer", version, about = "Interactive k-NN canvas")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML options file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for the generated points when the options list none.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of points to generate when the options list none.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub points: usize,
}
