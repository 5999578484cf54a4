//! Scaler port: trait for feature standardization.
//!
//! Abstracts the exported preprocessing step from the pipeline. The only
//! shipped implementation replays a scikit-learn `StandardScaler`, but the
//! pipeline never depends on that.

use thiserror::Error;

/// Errors from feature scaling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalerError {
    /// Input vector length does not match the exported parameters.
    #[error("scaler expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Scaling produced a non-finite value.
    #[error("scaled feature at index {index} is not finite")]
    NonFinite { index: usize },
}

/// Trait for replaying an exported feature scaler.
pub trait Scaler: Send + Sync {
    /// Transform a raw feature vector into model space.
    ///
    /// # Errors
    /// Returns [`ScalerError::DimensionMismatch`] when the input length does
    /// not match the exported parameters, [`ScalerError::NonFinite`] when a
    /// scaled value degenerates.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScalerError>;

    /// Number of features the scaler was fitted on.
    fn dimension(&self) -> usize;
}
