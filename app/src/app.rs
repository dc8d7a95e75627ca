use std::time::{Duration, Instant};

use eframe::{App, Frame, egui};
use knn_canvas::{
    CanvasError, ClickOutcome, ClickReport, InteractionController, ParameterChange,
    VisualizationOptions,
};
use tracing::warn;

use crate::surface::EguiSurface;
use crate::ui;

/// The main application struct.
/// It holds the controller and the surface it draws to; `ui` does the painting.
pub struct CanvasApp {
    // --- Core State ---
    pub controller: InteractionController,
    pub surface: EguiSurface,

    // --- UI State ---
    /// Whether the regression line is drawn over the points.
    pub show_regression: bool,
    /// The outcome of the most recent accepted click.
    pub last_report: Option<ClickReport>,
    pub dropped_clicks: usize,
    /// Shown under the controls until the next successful action.
    pub last_error: Option<String>,
}

impl CanvasApp {
    pub fn new(options: VisualizationOptions) -> Result<Self, CanvasError> {
        let controller = InteractionController::new(options)?;
        let mut surface = EguiSurface::default();
        controller.draw(&mut surface);
        Ok(Self {
            controller,
            surface,
            show_regression: false,
            last_report: None,
            dropped_clicks: 0,
            last_error: None,
        })
    }

    /// Forwards a click in canvas coordinates to the controller.
    pub fn handle_click(&mut self, position: [f64; 2]) {
        match self.controller.on_click(position, &mut self.surface) {
            Ok(ClickOutcome::Classified(report)) => {
                self.last_report = Some(report);
                self.last_error = None;
            }
            Ok(ClickOutcome::Dropped) => self.dropped_clicks += 1,
            Err(e) => {
                warn!(%e, "click failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn apply_parameter(&mut self, change: ParameterChange) {
        match self.controller.apply_parameter(change) {
            Ok(()) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Completes every click whose transition has finished and returns how
    /// long until the next one does.
    pub fn poll_cleanup(&mut self, now: Instant) -> Option<Duration> {
        for tag in self.surface.take_due(now) {
            self.controller.complete_cleanup(tag, &mut self.surface);
        }
        self.surface.next_deadline(now)
    }
}

impl App for CanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Keep repainting while a transition runs so the fade is visible.
        if self.poll_cleanup(Instant::now()).is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
        ui::draw_side_panel(self, ctx);
        ui::draw_central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knn_canvas::PointSpec;

    fn app() -> CanvasApp {
        CanvasApp::new(VisualizationOptions {
            transition_ms: 0,
            points: vec![PointSpec::new(0.0, 0.0, "A"), PointSpec::new(5.0, 5.0, "B")],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_click_and_poll_returns_to_idle() {
        let mut app = app();
        app.handle_click([100.0, 100.0]);
        assert!(app.last_report.is_some());
        assert!(!app.controller.is_idle());

        app.handle_click([120.0, 100.0]);
        assert_eq!(app.dropped_clicks, 1);

        assert_eq!(app.poll_cleanup(Instant::now()), None);
        assert!(app.controller.is_idle());
        assert_eq!(app.surface.points().len(), 3);
    }

    #[test]
    fn test_bad_parameter_is_reported() {
        let mut app = app();
        app.apply_parameter(ParameterChange::K(0));
        assert!(app.last_error.is_some());
        assert_eq!(app.controller.params().k(), 3);
    }
}
