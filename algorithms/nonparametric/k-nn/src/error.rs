//! Error types for the k-nn crate.

/// Errors that can occur when using the k-NN classifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// k cannot be zero for a k-NN classifier.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The rejected k value.
        k: usize,
    },

    /// A candidate produced a distance that cannot be ordered (NaN or infinite).
    #[error("non-finite distance to candidate {index}")]
    InvalidDistance {
        /// Position of the candidate in the searched slice.
        index: usize,
    },

    /// Query and candidate feature vectors differ in length.
    #[error("candidate {index} has {found} features, query has {expected}")]
    DimensionMismatch {
        /// Position of the candidate in the searched slice.
        index: usize,
        /// Length of the query feature vector.
        expected: usize,
        /// Length of the candidate feature vector.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 0 };
        assert_eq!(e.to_string(), "k must be >= 1, got 0");
    }

    #[test]
    fn error_invalid_distance() {
        let e = KnnError::InvalidDistance { index: 4 };
        assert_eq!(e.to_string(), "non-finite distance to candidate 4");
    }

    #[test]
    fn error_dimension_mismatch() {
        let e = KnnError::DimensionMismatch {
            index: 1,
            expected: 2,
            found: 3,
        };
        assert_eq!(e.to_string(), "candidate 1 has 3 features, query has 2");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
