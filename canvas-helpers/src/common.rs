use ndarray::{Array1, ArrayView1};
use crate::Float;
use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Anything a neighbor search can measure against: a feature vector and,
/// when it has been classified, a label.
///
/// Candidates whose `label` is `None` are ignored by the k-NN search, which
/// is how unclassified points and transient artifacts stay out of a vote.
pub trait Sample<F: Float> {
    type Label;

    fn features(&self) -> ArrayView1<'_, F>;

    fn label(&self) -> Option<&Self::Label>;
}

/// Represents a single data point with features and a label.
///
/// L: The type of the label (e.g., String, i32, enum).
/// F: The float type for the features (e.g., f32, f64).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub label: L,
}

impl<L, F> DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(features: Array1<F>, label: L) -> Self {
        DataPoint { features, label }
    }
}

impl<L, F> Sample<F> for DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    type Label = L;

    fn features(&self) -> ArrayView1<'_, F> {
        self.features.view()
    }

    fn label(&self) -> Option<&L> {
        Some(&self.label)
    }
}
