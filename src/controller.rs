//! The click-driven state machine tying search, store and surface together.
//!
//! ```text
//!            on_click()                      complete_cleanup(tag)
//!   Idle ───────────────▶ Processing{tag} ─────────────────────────▶ Idle
//!                            │  ▲
//!                            └──┘ clicks are dropped
//! ```
//!
//! Parameter changes are accepted in either state. Every click works on a
//! copy of the parameters taken when it starts, so a change only affects the
//! next click.

use std::time::Duration;

use canvas_helpers::L2Dist;
use ecolor::Color32;
use k_nn::{ClassificationParameters, KnnClassifier, Neighbor, Prediction};
use linear_regression::{RegressionError, RegressionLine, perform_regression};
use ndarray::{Array1, Array2};
use tracing::{debug, info, warn};

use crate::error::CanvasError;
use crate::options::VisualizationOptions;
use crate::palette::TypeColorAssignment;
use crate::store::{ArtifactTag, Label, Point, PointStore};
use crate::surface::{RenderSurface, Segment};
use crate::transform::CoordinateTransform;

/// Whether the controller accepts clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    /// One click is in flight until the surface completes `tag`.
    Processing {
        tag: ArtifactTag,
        /// Store index of the point the click added.
        point: usize,
    },
}

/// A change coming from a settings widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterChange {
    K(usize),
    Weighted(bool),
}

impl ParameterChange {
    /// Parses a `(name, value)` pair as sent by a text-based control.
    ///
    /// `k` must be a positive integer; `weighted` accepts `true`/`false`
    /// and `1`/`0`.
    pub fn parse(name: &str, value: &str) -> Result<Self, CanvasError> {
        let value = value.trim();
        match name {
            "k" => match value.parse::<usize>() {
                Ok(k) if k > 0 => Ok(ParameterChange::K(k)),
                _ => Err(CanvasError::parameter(
                    "k",
                    format!("must be a positive integer, got `{value}`"),
                )),
            },
            "weighted" => match value {
                "true" | "1" => Ok(ParameterChange::Weighted(true)),
                "false" | "0" => Ok(ParameterChange::Weighted(false)),
                _ => Err(CanvasError::parameter(
                    "weighted",
                    format!("must be a boolean, got `{value}`"),
                )),
            },
            other => Err(CanvasError::parameter(
                "name",
                format!("unknown parameter `{other}`"),
            )),
        }
    }
}

/// Everything a click produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickReport {
    /// Store index of the new point.
    pub index: usize,
    pub screen_position: [f64; 2],
    /// The click mapped back into data coordinates.
    pub data_position: [f64; 2],
    pub prediction: Prediction<String>,
    /// Ascending by distance; indices refer to the store.
    pub neighbors: Vec<Neighbor<f64>>,
    /// Radius of the bounding circle, if one was drawn.
    pub bounding_radius: Option<f64>,
    /// The parameters this click was classified with.
    pub params: ClassificationParameters,
    pub tag: ArtifactTag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Classified(ClickReport),
    /// Another click was still being processed.
    Dropped,
}

/// Owns the canvas state and runs one click at a time.
#[derive(Debug, Clone)]
pub struct InteractionController {
    options: VisualizationOptions,
    palette: TypeColorAssignment,
    transform: CoordinateTransform,
    store: PointStore,
    classifier: KnnClassifier<L2Dist>,
    params: ClassificationParameters,
    state: InteractionState,
    /// Connecting lines of the click in flight.
    segments: Vec<Segment>,
    next_tag: u64,
}

impl InteractionController {
    /// Validates `options`, fits the transform to the initial points and
    /// places them on the canvas in their class colors.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` / `InvalidLabels` from [`VisualizationOptions::validate`].
    /// * `InvalidData` for an initial point with a non-finite coordinate or
    ///   a label outside the label set.
    /// * `InvalidParameter` named `data` if the points span more than an
    ///   `f64` can represent.
    pub fn new(options: VisualizationOptions) -> Result<Self, CanvasError> {
        options.validate()?;
        let palette = TypeColorAssignment::new(&options.labels, options.default_fill)?;

        for (index, spec) in options.points.iter().enumerate() {
            if !spec.x.is_finite() || !spec.y.is_finite() {
                return Err(CanvasError::InvalidData {
                    index,
                    reason: format!("coordinates ({}, {}) are not finite", spec.x, spec.y),
                });
            }
            if !palette.contains(&spec.label) {
                return Err(CanvasError::InvalidData {
                    index,
                    reason: format!("label `{}` is not one of {:?}", spec.label, palette.labels()),
                });
            }
        }

        let points = &options.points;
        let data = Array2::from_shape_fn((points.len(), 2), |(i, j)| {
            if j == 0 { points[i].x } else { points[i].y }
        });
        let transform =
            CoordinateTransform::fit(data.view(), options.padding, options.width, options.height)?;

        let mut store = PointStore::new();
        for spec in points {
            let label = Label::Class(spec.label.clone());
            store.append(
                Point::new(
                    transform.forward([spec.x, spec.y]),
                    options.point_radius,
                    palette.color_of(&label),
                    options.default_stroke,
                )
                .with_label(label),
            );
        }

        let params =
            ClassificationParameters::new(options.initial_k)?.with_weighted(options.weighted);
        info!(
            points = store.len(),
            labels = ?palette.labels(),
            k = params.k(),
            weighted = params.weighted(),
            "canvas initialized"
        );

        Ok(Self {
            options,
            palette,
            transform,
            store,
            classifier: KnnClassifier::new(L2Dist),
            params,
            state: InteractionState::Idle,
            segments: Vec::new(),
            next_tag: 0,
        })
    }

    /// Sends the whole scene to `surface`.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.render(self.store.all());
        surface.render_lines(&self.segments);
    }

    /// Handles a click at `screen`.
    ///
    /// While a previous click is still in flight the click is dropped and
    /// nothing changes. Otherwise the point is classified against the store,
    /// appended in the default fill and drawn with its bounding circle and
    /// connecting lines, and the surface is asked to remove those after
    /// `transition_ms`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a position outside `[0, width] x [0, height]`,
    /// NaN included. The state stays `Idle`.
    #[tracing::instrument(level = "debug", skip(self, surface))]
    pub fn on_click(
        &mut self,
        screen: [f64; 2],
        surface: &mut dyn RenderSurface,
    ) -> Result<ClickOutcome, CanvasError> {
        if let InteractionState::Processing { tag, .. } = self.state {
            warn!(?tag, "click dropped, previous click still processing");
            return Ok(ClickOutcome::Dropped);
        }
        let [x, y] = screen;
        let on_canvas = (0.0..=self.options.width).contains(&x)
            && (0.0..=self.options.height).contains(&y);
        if !on_canvas {
            return Err(CanvasError::parameter(
                "click",
                format!(
                    "position {screen:?} is outside the {}x{} canvas",
                    self.options.width, self.options.height
                ),
            ));
        }

        let params = self.params;
        let data_position = self.transform.invert(screen);
        let classification = self
            .store
            .classify(&self.classifier, screen, None, &params)?;

        let tag = ArtifactTag(self.next_tag);
        self.next_tag += 1;

        let label = Label::from(classification.prediction.clone().into_label());
        let index = self.store.append(
            Point::new(
                screen,
                self.options.point_radius,
                self.options.default_fill,
                self.options.default_stroke,
            )
            .with_label(label),
        );

        let bounding_radius = classification.bounding_radius(self.options.point_radius);
        if let Some(radius) = bounding_radius {
            self.store.append(
                Point::new(
                    screen,
                    radius,
                    Color32::TRANSPARENT,
                    self.options.bounding_stroke,
                )
                .transient(tag),
            );
        }

        self.segments = classification
            .neighbors
            .iter()
            .filter_map(|n| self.store.get(n.index))
            .map(|neighbor| Segment {
                from: neighbor.position,
                to: screen,
                width: self.options.connecting_line_width,
                color: self.options.connecting_line_color,
                tag: Some(tag),
            })
            .collect();

        self.state = InteractionState::Processing { tag, point: index };
        self.draw(surface);
        surface.schedule_removal(tag, Duration::from_millis(self.options.transition_ms));

        debug!(
            index,
            ?data_position,
            prediction = ?classification.prediction,
            neighbors = classification.neighbors.len(),
            "click classified"
        );
        Ok(ClickOutcome::Classified(ClickReport {
            index,
            screen_position: screen,
            data_position,
            prediction: classification.prediction,
            neighbors: classification.neighbors,
            bounding_radius,
            params,
            tag,
        }))
    }

    /// Finishes the click tagged `tag`: removes its bounding circle and
    /// lines, gives the new point its class color and returns to `Idle`.
    ///
    /// Returns `false`, changing nothing, if `tag` is not the click in flight.
    #[tracing::instrument(level = "debug", skip(self, surface))]
    pub fn complete_cleanup(&mut self, tag: ArtifactTag, surface: &mut dyn RenderSurface) -> bool {
        let point = match self.state {
            InteractionState::Processing { tag: current, point } if current == tag => point,
            state => {
                warn!(?state, "ignoring stale cleanup");
                return false;
            }
        };

        let removed = self.store.remove(|p| p.transient == Some(tag));
        self.segments.retain(|s| s.tag != Some(tag));
        if let Some(fill) = self.store.get(point).map(|p| self.palette.color_of(&p.label)) {
            self.store.recolor(point, fill);
        }

        self.state = InteractionState::Idle;
        self.draw(surface);
        debug!(removed, "cleanup complete");
        true
    }

    /// Applies a `(name, value)` change from a text-based control.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for an unknown name or a bad value. The current
    /// parameters are kept.
    pub fn on_parameter_change(&mut self, name: &str, value: &str) -> Result<(), CanvasError> {
        let change = ParameterChange::parse(name, value).inspect_err(|e| warn!(%e, "rejected"))?;
        self.apply_parameter(change)
    }

    /// Applies a typed change. Takes effect on the next click.
    pub fn apply_parameter(&mut self, change: ParameterChange) -> Result<(), CanvasError> {
        match change {
            ParameterChange::K(k) => self.params.set_k(k).map_err(|_| {
                warn!(k, "rejected k");
                CanvasError::parameter("k", format!("must be a positive integer, got `{k}`"))
            })?,
            ParameterChange::Weighted(weighted) => self.params.set_weighted(weighted),
        }
        debug!(k = self.params.k(), weighted = self.params.weighted(), "parameters updated");
        Ok(())
    }

    /// Least-squares line through the classified points, in screen space.
    pub fn regression(&self) -> Result<RegressionLine<f64>, RegressionError> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .store
            .all()
            .iter()
            .filter(|p| !p.is_transient() && p.label.is_classified())
            .map(|p| (p.x(), p.y()))
            .unzip();
        perform_regression(Array1::from(xs).view(), Array1::from(ys).view())
    }

    /// Upper bound for a `k` control: the number of classified points, at least 1.
    pub fn max_k(&self) -> usize {
        self.store.labeled_len().max(1)
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn params(&self) -> ClassificationParameters {
        self.params
    }

    pub fn points(&self) -> &[Point] {
        self.store.all()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn palette(&self) -> &TypeColorAssignment {
        &self.palette
    }

    pub fn options(&self) -> &VisualizationOptions {
        &self.options
    }
}
