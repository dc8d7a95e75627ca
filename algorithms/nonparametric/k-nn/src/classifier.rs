use std::fmt::Debug;

use canvas_helpers::{Distance, Float, Sample};
use ndarray::ArrayView1;
use tracing::{debug, trace};

use crate::error::KnnError;
use crate::params::ClassificationParameters;
use crate::search::{Neighbor, find_k_closest};
use crate::vote::{Prediction, majority_vote, weighted_vote};

/// The label chosen for a query together with the neighbors that chose it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<L, F> {
    pub prediction: Prediction<L>,
    /// Ascending by distance, at most `k` long.
    pub neighbors: Vec<Neighbor<F>>,
}

impl<L, F: Float> Classification<L, F> {
    /// The last (and therefore furthest) of the returned neighbors.
    pub fn furthest(&self) -> Option<&Neighbor<F>> {
        self.neighbors.last()
    }

    /// Radius of a circle around the query that encloses every neighbor
    /// drawn with `point_radius`, or `None` without neighbors.
    pub fn bounding_radius(&self, point_radius: F) -> Option<F> {
        self.furthest().map(|n| n.distance + point_radius)
    }
}

/// A k-Nearest Neighbors (k-NN) classifier for a candidate set that grows
/// between queries.
///
/// The classifier owns only the metric. The candidates and the
/// [`ClassificationParameters`] are passed into every call, so a caller can
/// change `k` or the voting rule between queries without rebuilding anything.
///
/// # Type Parameters
///
/// * `D`: The distance metric, which must implement the `canvas_helpers::Distance` trait.
#[derive(Debug, Clone, Default)]
pub struct KnnClassifier<D> {
    distance: D,
}

impl<D> KnnClassifier<D> {
    pub fn new(distance: D) -> Self {
        Self { distance }
    }

    /// Classifies `query` against `candidates`.
    ///
    /// 1. Collect the `params.k()` closest labeled candidates (see [`find_k_closest`]),
    ///    leaving out position `skip` when the query itself is stored.
    /// 2. Vote among them: majority when `params.weighted()` is false,
    ///    inverse-distance weighted otherwise.
    ///
    /// No eligible candidates yields `Prediction::Indeterminate` with an empty
    /// neighbor set.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`find_k_closest`].
    pub fn classify<F, S>(
        &self,
        query: ArrayView1<F>,
        candidates: &[S],
        skip: Option<usize>,
        params: &ClassificationParameters,
    ) -> Result<Classification<S::Label, F>, KnnError>
    where
        F: Float,
        S: Sample<F>,
        S::Label: PartialEq + Clone + Debug,
        D: Distance<F>,
    {
        let neighbors = find_k_closest(query, candidates, params.k(), skip, &self.distance)?;
        trace!(?neighbors, "k closest neighbors");

        // `find_k_closest` only returns labeled candidates.
        let labeled = neighbors.iter().filter_map(|n| {
            candidates[n.index]
                .label()
                .map(|label| (label, n.distance))
        });
        let prediction = if params.weighted() {
            weighted_vote(labeled)
        } else {
            majority_vote(labeled.map(|(label, _)| label))
        };

        debug!(
            k = params.k(),
            weighted = params.weighted(),
            found = neighbors.len(),
            ?prediction,
            "classified query"
        );
        Ok(Classification {
            prediction,
            neighbors,
        })
    }

    /// Predicts the label for a point, treating an empty neighborhood as `None`.
    pub fn predict<F, S>(
        &self,
        query: ArrayView1<F>,
        candidates: &[S],
        params: &ClassificationParameters,
    ) -> Result<Option<S::Label>, KnnError>
    where
        F: Float,
        S: Sample<F>,
        S::Label: PartialEq + Clone + Debug,
        D: Distance<F>,
    {
        self.classify(query, candidates, None, params)
            .map(|c| c.prediction.into_label())
    }
}
