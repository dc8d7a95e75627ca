//! Online k-nearest-neighbor classification.
//!
//! The candidate set is whatever slice the caller hands in, so it can grow
//! between queries. A query runs in three steps:
//!
//! ```text
//! KnnClassifier::classify()
//!   ├─ find_k_closest()      (search.rs)  distances, total order, take k
//!   └─ majority_vote()       (vote.rs)    or weighted_vote() when weighted
//! ```
//!
//! # Quick start
//!
//! ```
//! use canvas_helpers::{DataPoint, L2Dist};
//! use k_nn::{ClassificationParameters, KnnClassifier, Prediction};
//! use ndarray::array;
//!
//! let store = vec![
//!     DataPoint::new(array![0.0, 0.0], "A"),
//!     DataPoint::new(array![10.0, 0.0], "A"),
//!     DataPoint::new(array![0.0, 10.0], "B"),
//! ];
//! let params = ClassificationParameters::new(3).unwrap();
//! let query = array![1.0, 1.0];
//!
//! let result = KnnClassifier::new(L2Dist)
//!     .classify(query.view(), &store, None, &params)
//!     .unwrap();
//! assert_eq!(result.prediction, Prediction::Label("A"));
//! ```

pub mod classifier;
pub mod error;
pub mod params;
pub mod search;
pub mod vote;

pub use classifier::{Classification, KnnClassifier};
pub use error::KnnError;
pub use params::ClassificationParameters;
pub use search::{Neighbor, find_k_closest};
pub use vote::{Prediction, majority_vote, weighted_vote};
