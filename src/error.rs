//! Error types for the canvas crate.

use k_nn::KnnError;

/// Error type for every fallible operation on the canvas.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A setting was out of range; the previous value is kept.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the rejected setting.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The label set is empty or contains an empty label.
    #[error("invalid label set: {0}")]
    InvalidLabels(String),

    /// An initial data point failed validation.
    #[error("invalid data point {index}: {reason}")]
    InvalidData {
        /// Position of the point in the initial data set.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The neighbor search rejected its input.
    #[error(transparent)]
    Knn(#[from] KnnError),

    /// The configuration file is not valid TOML for the options schema.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl CanvasError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        CanvasError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_parameter() {
        let e = CanvasError::parameter("k", "must be a positive integer, got `0`");
        assert_eq!(
            e.to_string(),
            "invalid parameter `k`: must be a positive integer, got `0`"
        );
    }

    #[test]
    fn error_invalid_data() {
        let e = CanvasError::InvalidData {
            index: 3,
            reason: "x is not finite".into(),
        };
        assert_eq!(e.to_string(), "invalid data point 3: x is not finite");
    }

    #[test]
    fn error_knn_is_transparent() {
        let e = CanvasError::from(KnnError::InvalidK { k: 0 });
        assert_eq!(e.to_string(), "k must be >= 1, got 0");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<CanvasError>();
    }
}
