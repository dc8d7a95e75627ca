//! Closed-form ordinary least squares for a line through 2-D points.

use canvas_helpers::Float;
use ndarray::ArrayView1;

/// Errors that can occur when fitting a regression line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegressionError {
    /// Nothing to fit.
    #[error("cannot fit a line through an empty point set")]
    EmptyInput,

    /// The x and y columns differ in length.
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    /// Every point shares one x value, so the slope is undefined.
    #[error("all points share x = {x}; the line is vertical")]
    VerticalLine { x: f64 },
}

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionLine<F> {
    pub slope: F,
    pub intercept: F,
}

impl<F: Float> RegressionLine<F> {
    pub fn y_at(&self, x: F) -> F {
        self.slope * x + self.intercept
    }
}

/// Fits a least-squares line through the points `(xs[i], ys[i])`.
///
/// `slope = sum((x - mean_x) * (y - mean_y)) / sum((x - mean_x)^2)`,
/// `intercept = mean_y - slope * mean_x`.
pub fn perform_regression<F: Float>(
    xs: ArrayView1<F>,
    ys: ArrayView1<F>,
) -> Result<RegressionLine<F>, RegressionError> {
    if xs.len() != ys.len() {
        return Err(RegressionError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }
    let (Some(mean_x), Some(mean_y)) = (xs.mean(), ys.mean()) else {
        return Err(RegressionError::EmptyInput);
    };

    let (up, down) = xs
        .iter()
        .zip(ys.iter())
        .fold((F::zero(), F::zero()), |(up, down), (&x, &y)| {
            let dx = x - mean_x;
            (up + dx * (y - mean_y), down + dx * dx)
        });

    if down == F::zero() {
        return Err(RegressionError::VerticalLine {
            x: mean_x.to_f64().unwrap_or(f64::NAN),
        });
    }
    let slope = up / down;
    Ok(RegressionLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
