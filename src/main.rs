// Headless walk through the canvas: scatter two clusters, click a few times
// and print what each click was classified as.
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;
use tracing_subscriber::EnvFilter;

use knn_canvas::{
    ArtifactTag, ClickOutcome, InteractionController, ParameterChange, Point, PointSpec,
    RenderSurface, Segment, VisualizationOptions,
};

/// Logs what would be drawn and remembers the last scheduled removal.
#[derive(Default)]
struct ConsoleSurface {
    pending: Option<ArtifactTag>,
}

impl RenderSurface for ConsoleSurface {
    fn render(&mut self, points: &[Point]) {
        let transient = points.iter().filter(|p| p.is_transient()).count();
        info!(points = points.len(), transient, "render");
    }

    fn render_lines(&mut self, segments: &[Segment]) {
        info!(segments = segments.len(), "render lines");
    }

    fn schedule_removal(&mut self, tag: ArtifactTag, after: Duration) {
        info!(?tag, ?after, "removal scheduled");
        self.pending = Some(tag);
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("knn_canvas=info,k_nn=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let mut points = Vec::new();
    for (label, center) in [("A", (20.0, 30.0)), ("B", (70.0, 60.0))] {
        for _ in 0..10 {
            points.push(PointSpec::new(
                center.0 + rng.random_range(-15.0..15.0),
                center.1 + rng.random_range(-15.0..15.0),
                label,
            ));
        }
    }

    let options = VisualizationOptions {
        points,
        ..Default::default()
    };
    let mut controller =
        InteractionController::new(options).context("failed to build the canvas")?;
    let mut surface = ConsoleSurface::default();
    controller.draw(&mut surface);

    let clicks = [[100.0, 100.0], [400.0, 200.0], [250.0, 150.0]];
    for (i, click) in clicks.into_iter().enumerate() {
        if i == 2 {
            controller.apply_parameter(ParameterChange::Weighted(true))?;
        }
        match controller.on_click(click, &mut surface)? {
            ClickOutcome::Classified(report) => println!(
                "click {click:?} -> data ({:.1}, {:.1}): {:?} from {} neighbors (k = {}, weighted = {})",
                report.data_position[0],
                report.data_position[1],
                report.prediction,
                report.neighbors.len(),
                report.params.k(),
                report.params.weighted(),
            ),
            ClickOutcome::Dropped => println!("click {click:?} dropped"),
        }
        if let Some(tag) = surface.pending.take() {
            controller.complete_cleanup(tag, &mut surface);
        }
    }

    match controller.regression() {
        Ok(line) => println!(
            "regression: y = {:.3} x + {:.3}",
            line.slope, line.intercept
        ),
        Err(e) => println!("regression unavailable: {e}"),
    }
    Ok(())
}
