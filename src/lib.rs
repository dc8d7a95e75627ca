//! Interactive k-nearest-neighbor classification on a 2-D canvas.
//!
//! Each click places a point, classifies it against every point placed
//! before it and shows the decision: the neighbors used, a circle enclosing
//! them and a line to each. The pieces:
//!
//! ```text
//! InteractionController     (controller.rs)  Idle / Processing state machine
//!   ├─ CoordinateTransform  (transform.rs)   data <-> screen
//!   ├─ TypeColorAssignment  (palette.rs)     label -> color
//!   ├─ PointStore           (store.rs)       points in screen space
//!   │    └─ k_nn::KnnClassifier              search and vote
//!   └─ RenderSurface        (surface.rs)     whatever draws it
//! ```
//!
//! # Example
//!
//! ```
//! use knn_canvas::{ClickOutcome, InteractionController, PointSpec, RecordingSurface,
//!                  VisualizationOptions};
//!
//! let options = VisualizationOptions {
//!     points: vec![
//!         PointSpec::new(0.0, 0.0, "A"),
//!         PointSpec::new(10.0, 0.0, "A"),
//!         PointSpec::new(0.0, 10.0, "B"),
//!     ],
//!     ..Default::default()
//! };
//! let mut controller = InteractionController::new(options).unwrap();
//! let mut surface = RecordingSurface::new();
//!
//! let outcome = controller.on_click([120.0, 160.0], &mut surface).unwrap();
//! assert!(matches!(outcome, ClickOutcome::Classified(_)));
//!
//! // A second click before the first one is cleaned up is dropped.
//! let again = controller.on_click([10.0, 10.0], &mut surface).unwrap();
//! assert_eq!(again, ClickOutcome::Dropped);
//!
//! let tag = surface.pop_scheduled().unwrap();
//! assert!(controller.complete_cleanup(tag, &mut surface));
//! assert!(controller.is_idle());
//! ```

pub mod controller;
pub mod error;
pub mod options;
pub mod palette;
pub mod store;
pub mod surface;
pub mod transform;

pub use controller::{
    ClickOutcome, ClickReport, InteractionController, InteractionState, ParameterChange,
};
pub use error::CanvasError;
pub use options::{PointSpec, VisualizationOptions};
pub use palette::{SCHEME_SET1, TypeColorAssignment};
pub use store::{ArtifactTag, Label, Point, PointStore};
pub use surface::{RecordingSurface, RenderSurface, Segment};
pub use transform::{CoordinateTransform, LinearScale};

pub use canvas_helpers::{DataPoint, Distance, Float, L2Dist, Sample};
pub use k_nn::{
    Classification, ClassificationParameters, KnnClassifier, KnnError, Neighbor, Prediction,
};
pub use linear_regression::{RegressionError, RegressionLine, perform_regression};
