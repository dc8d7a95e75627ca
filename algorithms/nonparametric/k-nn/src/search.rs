//! k-closest neighbor selection.

use std::cmp::Ordering;

use canvas_helpers::{Distance, Float, Sample};
use ndarray::ArrayView1;

use crate::error::KnnError;

/// One entry of a neighbor set: where the candidate sits in the searched
/// slice and how far it is from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<F> {
    pub index: usize,
    pub distance: F,
}

/// Finds the (up to) `k` candidates closest to `query`.
///
/// * Candidates without a label are never neighbors.
/// * `skip` names the query's own slot when the query is already stored.
///   Exclusion is by position, so a different candidate at the same
///   coordinates is still a neighbor.
/// * The result is ascending by distance; equal distances keep the order in
///   which the candidates appear in `candidates`.
///
/// Fewer than `k` neighbors are returned when fewer eligible candidates exist.
///
/// # Errors
///
/// * `KnnError::InvalidK` if `k` is 0.
/// * `KnnError::DimensionMismatch` if a candidate's features differ in length from the query's.
/// * `KnnError::InvalidDistance` if a distance is NaN or infinite.
pub fn find_k_closest<F, S, D>(
    query: ArrayView1<F>,
    candidates: &[S],
    k: usize,
    skip: Option<usize>,
    metric: &D,
) -> Result<Vec<Neighbor<F>>, KnnError>
where
    F: Float,
    S: Sample<F>,
    D: Distance<F>,
{
    if k == 0 {
        return Err(KnnError::InvalidK { k });
    }

    let mut neighbors = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.iter().enumerate() {
        if Some(index) == skip || candidate.label().is_none() {
            continue;
        }
        let features = candidate.features();
        if features.len() != query.len() {
            return Err(KnnError::DimensionMismatch {
                index,
                expected: query.len(),
                found: features.len(),
            });
        }
        // Ranked by the reduced distance; only the kept `k` are converted.
        let rdist = metric.rdistance(query, features);
        if !rdist.is_finite() {
            return Err(KnnError::InvalidDistance { index });
        }
        neighbors.push(Neighbor {
            index,
            distance: rdist,
        });
    }

    // All distances are finite here, so `partial_cmp` never yields `None`;
    // the index comparison makes the order total and reproducible.
    neighbors.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    neighbors.truncate(k);
    for neighbor in &mut neighbors {
        neighbor.distance = metric.rdist_to_dist(neighbor.distance);
    }

    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use canvas_helpers::{DataPoint, L2Dist};
    use ndarray::{Array1, array};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    struct Unlabeled(Array1<f64>);

    impl Sample<f64> for Unlabeled {
        type Label = &'static str;

        fn features(&self) -> ArrayView1<'_, f64> {
            self.0.view()
        }

        fn label(&self) -> Option<&&'static str> {
            None
        }
    }

    fn indices(neighbors: &[Neighbor<f64>]) -> Vec<usize> {
        neighbors.iter().map(|n| n.index).collect()
    }

    #[test]
    fn test_orders_by_distance() {
        let store = vec![
            DataPoint::new(array![0.0, 0.0], "A"),
            DataPoint::new(array![10.0, 0.0], "A"),
            DataPoint::new(array![0.0, 10.0], "B"),
        ];
        let query = array![1.0, 1.0];
        let neighbors = find_k_closest(query.view(), &store, 3, None, &L2Dist).unwrap();

        assert_eq!(neighbors.len(), 3);
        assert_eq!(neighbors[0].index, 0);
        assert_abs_diff_eq!(neighbors[0].distance, 2.0_f64.sqrt(), epsilon = 1e-12);
        // (10,0) and (0,10) are equidistant from (1,1): insertion order decides.
        assert_eq!(indices(&neighbors[1..]), vec![1, 2]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let store = vec![
            DataPoint::new(array![0.0, 2.0], "B"),
            DataPoint::new(array![2.0, 0.0], "A"),
            DataPoint::new(array![0.0, -2.0], "B"),
            DataPoint::new(array![-2.0, 0.0], "A"),
        ];
        let query = array![0.0, 0.0];
        let neighbors = find_k_closest(query.view(), &store, 4, None, &L2Dist).unwrap();
        assert_eq!(indices(&neighbors), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_takes_at_most_k() {
        let store: Vec<_> = (0..10)
            .map(|i| DataPoint::new(array![i as f64, 0.0], "A"))
            .collect();
        let query = array![0.0, 0.0];
        let neighbors = find_k_closest(query.view(), &store, 4, None, &L2Dist).unwrap();
        assert_eq!(indices(&neighbors), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_k_larger_than_store() {
        let store = vec![
            DataPoint::new(array![1.0, 1.0], "A"),
            DataPoint::new(array![2.0, 2.0], "B"),
        ];
        let query = array![0.0, 0.0];
        let neighbors = find_k_closest(query.view(), &store, 9, None, &L2Dist).unwrap();
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn test_skip_excludes_only_the_query_slot() {
        // Two distinct points sharing coordinates: only the skipped slot goes.
        let store = vec![
            DataPoint::new(array![3.0, 3.0], "A"),
            DataPoint::new(array![3.0, 3.0], "B"),
            DataPoint::new(array![9.0, 9.0], "A"),
        ];
        let query = store[0].features.clone();
        let neighbors = find_k_closest(query.view(), &store, 3, Some(0), &L2Dist).unwrap();
        assert_eq!(indices(&neighbors), vec![1, 2]);
        assert_eq!(neighbors[0].distance, 0.0);
    }

    #[test]
    fn test_unlabeled_candidates_are_ignored() {
        let store = vec![
            Unlabeled(array![0.0, 0.0]),
            Unlabeled(array![1.0, 1.0]),
        ];
        let query = array![0.0, 0.0];
        let neighbors = find_k_closest(query.view(), &store, 2, None, &L2Dist).unwrap();
        assert!(neighbors.is_empty());
    }

    #[test]
    fn test_empty_store() {
        let store: Vec<DataPoint<&str, f64>> = vec![];
        let query = array![5.0, 5.0];
        let neighbors = find_k_closest(query.view(), &store, 3, None, &L2Dist).unwrap();
        assert!(neighbors.is_empty());
    }

    /// Squared Euclidean ranking; counts how many values get converted back.
    #[derive(Clone, Default)]
    struct CountingL2 {
        conversions: Arc<AtomicUsize>,
    }

    impl Distance<f64> for CountingL2 {
        fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
            self.rdist_to_dist(self.rdistance(a, b))
        }

        fn rdistance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
            L2Dist.rdistance(a, b)
        }

        fn rdist_to_dist(&self, rdist: f64) -> f64 {
            self.conversions.fetch_add(1, AtomicOrdering::Relaxed);
            rdist.sqrt()
        }
    }

    #[test]
    fn test_only_kept_neighbors_are_converted() {
        let store: Vec<_> = (0..20)
            .map(|i| DataPoint::new(array![i as f64, 0.0], "A"))
            .collect();
        let metric = CountingL2::default();
        let query = array![0.0, 4.0];
        let neighbors = find_k_closest(query.view(), &store, 3, None, &metric).unwrap();

        assert_eq!(metric.conversions.load(AtomicOrdering::Relaxed), 3);
        assert_eq!(indices(&neighbors), vec![0, 1, 2]);
        assert_abs_diff_eq!(neighbors[0].distance, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(neighbors[2].distance, 20.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_error_on_k_zero() {
        let store = vec![DataPoint::new(array![0.0, 0.0], "A")];
        let query = array![0.0, 0.0];
        let result = find_k_closest(query.view(), &store, 0, None, &L2Dist);
        assert_eq!(result, Err(KnnError::InvalidK { k: 0 }));
    }

    #[test]
    fn test_error_on_nan_candidate() {
        let store = vec![
            DataPoint::new(array![0.0, 0.0], "A"),
            DataPoint::new(array![f64::NAN, 0.0], "B"),
        ];
        let query = array![1.0, 1.0];
        let result = find_k_closest(query.view(), &store, 2, None, &L2Dist);
        assert_eq!(result, Err(KnnError::InvalidDistance { index: 1 }));
    }

    #[test]
    fn test_error_on_dimension_mismatch() {
        let store = vec![DataPoint::new(array![0.0, 0.0, 0.0], "A")];
        let query = array![1.0, 1.0];
        let result = find_k_closest(query.view(), &store, 1, None, &L2Dist);
        assert_eq!(
            result,
            Err(KnnError::DimensionMismatch {
                index: 0,
                expected: 2,
                found: 3
            })
        );
    }
}
