use ndarray::ArrayView1;

use crate::Float;

/// A metric between two feature vectors of equal length.
pub trait Distance<F: Float>: Clone + Send + Sync {
    /// The true distance between `a` and `b`.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// A cheaper value that orders pairs the same way `distance` does.
    ///
    /// Defaults to `distance` itself.
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.distance(a, b)
    }

    /// Converts a reduced distance back into a true distance.
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }
}

/// Euclidean distance, `sqrt(sum((b_i - a_i)^2))`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| {
                let d = y - x;
                d * d
            })
            .sum()
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_l2_pythagorean_triple() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert_abs_diff_eq!(L2Dist.distance(a.view(), b.view()), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(L2Dist.rdistance(a.view(), b.view()), 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(L2Dist.rdist_to_dist(25.0_f64), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_l2_is_symmetric() {
        let pairs = [
            (array![1.0, 2.0], array![-7.5, 3.25]),
            (array![0.0, 0.0], array![0.0, 0.0]),
            (array![1e6, -1e6], array![-3.0, 12.0]),
        ];
        for (a, b) in &pairs {
            assert_eq!(
                L2Dist.distance(a.view(), b.view()),
                L2Dist.distance(b.view(), a.view())
            );
        }
    }

    #[test]
    fn test_l2_identical_points_is_zero() {
        let a = array![4.0_f32, 4.0];
        assert_eq!(L2Dist.distance(a.view(), a.view()), 0.0);
    }
}
