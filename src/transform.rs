//! Coordinate transforms between data space and the canvas.
//!
//! The domain comes from the extrema of the data set widened by `padding`
//! on both sides and maps linearly onto `[0, extent]`. The transform is built
//! once; points added later may fall outside the initial domain.

use ndarray::{ArrayView1, ArrayView2, Axis};
use ndarray_stats::QuantileExt;
use tracing::debug;

use crate::error::CanvasError;

/// Half-width used for a domain that would otherwise have zero span.
pub const DEFAULT_HALF_SPAN: f64 = 1.0;

/// An affine map from a data interval onto a screen interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Fits a scale to `values` widened by `padding`, mapped onto `[0, extent]`.
    ///
    /// An empty input centers on 0. If the padded domain collapses to a
    /// single value it becomes `center ± DEFAULT_HALF_SPAN`.
    ///
    /// # Errors
    ///
    /// `CanvasError::InvalidParameter` if `extent` is not a positive finite
    /// number, `padding` is negative or not finite, or the padded domain is
    /// wider than an `f64` can represent.
    pub fn fit(values: ArrayView1<f64>, padding: f64, extent: f64) -> Result<Self, CanvasError> {
        if !(extent.is_finite() && extent > 0.0) {
            return Err(CanvasError::parameter(
                "extent",
                format!("must be positive and finite, got {extent}"),
            ));
        }
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(CanvasError::parameter(
                "padding",
                format!("must be non-negative and finite, got {padding}"),
            ));
        }

        let (min, max) = match (values.min(), values.max()) {
            (Ok(&min), Ok(&max)) if min.is_finite() && max.is_finite() => (min, max),
            _ => (0.0, 0.0),
        };

        let mut domain = (min - padding, max + padding);
        if domain.1 - domain.0 == 0.0 {
            let center = min / 2.0 + max / 2.0;
            // Near the ends of the f64 range `± 1` would be absorbed.
            let half = DEFAULT_HALF_SPAN.max(center.abs() * f64::EPSILON);
            debug!(min, max, padding, "degenerate domain, using default span");
            domain = (center - half, center + half);
        }
        let span = domain.1 - domain.0;
        if !(span.is_finite() && span > 0.0) {
            return Err(CanvasError::parameter(
                "data",
                format!(
                    "padded domain [{}, {}] has no finite span",
                    domain.0, domain.1
                ),
            ));
        }

        Ok(Self {
            domain,
            range: (0.0, extent),
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Data value to screen value.
    pub fn forward(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Screen value to data value.
    pub fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        d0 + (value - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Independent horizontal and vertical scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl CoordinateTransform {
    /// Fits both axes to an `n x 2` array of `(x, y)` rows.
    pub fn fit(
        data: ArrayView2<f64>,
        padding: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, CanvasError> {
        if data.ncols() != 2 {
            return Err(CanvasError::parameter(
                "data",
                format!("expected 2 columns, got {}", data.ncols()),
            ));
        }
        Ok(Self {
            x: LinearScale::fit(data.index_axis(Axis(1), 0), padding, width)?,
            y: LinearScale::fit(data.index_axis(Axis(1), 1), padding, height)?,
        })
    }

    pub fn forward(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [self.x.forward(x), self.y.forward(y)]
    }

    pub fn invert(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [self.x.invert(x), self.y.invert(y)]
    }
}
