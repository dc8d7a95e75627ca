//! What the controller needs from whatever draws the canvas.

use std::time::Duration;

use ecolor::Color32;

use crate::store::{ArtifactTag, Point};

/// A straight line on the canvas, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub width: f64,
    pub color: Color32,
    /// Transient segments carry the tag of the click that drew them.
    pub tag: Option<ArtifactTag>,
}

/// A drawing backend.
///
/// Calls describe the full scene; an implementation may redraw from scratch
/// each time. Timing is the surface's business: once `after` has elapsed
/// following [`RenderSurface::schedule_removal`], the owner of the surface
/// must hand the tag back to
/// [`InteractionController::complete_cleanup`](crate::InteractionController::complete_cleanup).
pub trait RenderSurface {
    /// Draws every point, transient artifacts included.
    fn render(&mut self, points: &[Point]);

    /// Draws the current transient segments. An empty slice clears them.
    fn render_lines(&mut self, segments: &[Segment]);

    /// Starts the fade-out of everything tagged `tag`.
    fn schedule_removal(&mut self, tag: ArtifactTag, after: Duration);
}

/// Records every call. Useful for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub frames: Vec<Vec<Point>>,
    pub lines: Vec<Vec<Segment>>,
    pub scheduled: Vec<(ArtifactTag, Duration)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered points.
    pub fn last_frame(&self) -> Option<&[Point]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn last_lines(&self) -> Option<&[Segment]> {
        self.lines.last().map(Vec::as_slice)
    }

    /// Takes the oldest pending removal.
    pub fn pop_scheduled(&mut self) -> Option<ArtifactTag> {
        if self.scheduled.is_empty() {
            None
        } else {
            Some(self.scheduled.remove(0).0)
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn render(&mut self, points: &[Point]) {
        self.frames.push(points.to_vec());
    }

    fn render_lines(&mut self, segments: &[Segment]) {
        self.lines.push(segments.to_vec());
    }

    fn schedule_removal(&mut self, tag: ArtifactTag, after: Duration) {
        self.scheduled.push((tag, after));
    }
}
