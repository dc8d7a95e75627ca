use ndarray::{NdFloat, ScalarOperand};

use num_traits::{FromPrimitive, NumCast, Signed};

use std::iter::Sum;

// Include submodules
mod common;
mod distance;

// Re-export types from submodules
pub use common::{DataPoint, Sample};
pub use distance::{Distance, L2Dist};

/// Floating point scalar used for point coordinates and distances.
pub trait Float:
    NdFloat + FromPrimitive + Default + Signed + Sum + ScalarOperand + std::marker::Unpin
{
    fn cast<T: NumCast>(x: T) -> Option<Self> {
        NumCast::from(x)
    }
}

impl Float for f32 {}

impl Float for f64 {}
