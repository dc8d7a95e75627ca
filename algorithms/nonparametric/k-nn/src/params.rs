//! Parameters for a single classification.

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::KnnError;

/// The number of neighbors to consult and how their votes are counted.
///
/// `k` is always at least 1; every constructor and setter enforces it and a
/// rejected update leaves the previous value in place.
///
/// # Example
///
/// ```
/// use k_nn::ClassificationParameters;
///
/// let mut params = ClassificationParameters::new(3).unwrap().with_weighted(true);
/// assert!(params.set_k(0).is_err());
/// assert_eq!(params.k(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ClassificationParameters {
    k: usize,
    weighted: bool,
}

impl ClassificationParameters {
    /// Creates unweighted (majority vote) parameters.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `k` is 0.
    pub fn new(k: usize) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK { k });
        }
        Ok(Self { k, weighted: false })
    }

    /// Switches between majority and inverse-distance voting.
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn weighted(&self) -> bool {
        self.weighted
    }

    /// Replaces `k`, keeping the old value if the new one is 0.
    pub fn set_k(&mut self, k: usize) -> Result<(), KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK { k });
        }
        self.k = k;
        Ok(())
    }

    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }
}

impl Default for ClassificationParameters {
    fn default() -> Self {
        Self {
            k: 3,
            weighted: false,
        }
    }
}
