mod app;
mod cli;
mod logging;
mod surface;
mod ui;

use std::process;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use knn_canvas::{PointSpec, VisualizationOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::app::CanvasApp;
use crate::cli::Cli;

/// Width of the settings panel next to the canvas.
const SIDE_PANEL_WIDTH: f32 = 240.0;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut options = match &cli.config {
        Some(path) => VisualizationOptions::load(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None => VisualizationOptions::default(),
    };
    if options.points.is_empty() {
        options.points = random_points(&options.labels, cli.points, cli.seed);
        info!(count = options.points.len(), seed = ?cli.seed, "generated initial points");
    }

    let size = [
        options.width as f32 + SIDE_PANEL_WIDTH + 40.0,
        options.height as f32 + 40.0,
    ];
    let app = CanvasApp::new(options).context("failed to build the canvas")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(size),
        ..Default::default()
    };
    eframe::run_native(
        "k-NN Canvas",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("{e}"))
}

/// One loose cluster per label around a random center in `[0, 100]^2`.
fn random_points(labels: &[String], count: usize, seed: Option<u64>) -> Vec<PointSpec> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let centers: Vec<(f64, f64)> = labels
        .iter()
        .map(|_| (rng.gen_range(15.0..85.0), rng.gen_range(15.0..85.0)))
        .collect();

    (0..count)
        .filter_map(|i| {
            let slot = i % labels.len().max(1);
            let (cx, cy) = *centers.get(slot)?;
            Some(PointSpec::new(
                cx + rng.gen_range(-15.0..15.0),
                cy + rng.gen_range(-15.0..15.0),
                labels[slot].clone(),
            ))
        })
        .collect()
}
