use std::time::{Duration, Instant};

use knn_canvas::{ArtifactTag, Point, RenderSurface, Segment};

#[derive(Debug, Clone, Copy)]
struct PendingRemoval {
    tag: ArtifactTag,
    start: Instant,
    after: Duration,
}

impl PendingRemoval {
    fn deadline(&self) -> Instant {
        self.start + self.after
    }
}

/// Keeps the last scene the controller sent so egui can repaint it every
/// frame, and tracks when each click's artifacts are due to go.
#[derive(Debug, Default)]
pub struct EguiSurface {
    points: Vec<Point>,
    segments: Vec<Segment>,
    pending: Vec<PendingRemoval>,
}

impl EguiSurface {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Removes and returns the tags whose transition has finished by `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<ArtifactTag> {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.iter().partition(|p| p.deadline() <= now);
        self.pending = waiting;
        due.into_iter().map(|p| p.tag).collect()
    }

    /// Time left until the next removal is due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.deadline().saturating_duration_since(now))
            .min()
    }

    /// Opacity of the artifacts tagged `tag`: 1 when drawn, 0 when due.
    pub fn opacity(&self, tag: ArtifactTag, now: Instant) -> f32 {
        match self.pending.iter().find(|p| p.tag == tag) {
            Some(p) if !p.after.is_zero() => {
                let elapsed = now.saturating_duration_since(p.start).as_secs_f32();
                (1.0 - elapsed / p.after.as_secs_f32()).clamp(0.0, 1.0)
            }
            Some(_) => 0.0,
            None => 1.0,
        }
    }
}

impl RenderSurface for EguiSurface {
    fn render(&mut self, points: &[Point]) {
        self.points = points.to_vec();
    }

    fn render_lines(&mut self, segments: &[Segment]) {
        self.segments = segments.to_vec();
    }

    fn schedule_removal(&mut self, tag: ArtifactTag, after: Duration) {
        self.pending.push(PendingRemoval {
            tag,
            start: Instant::now(),
            after,
        });
    }
}
