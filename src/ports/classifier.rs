//! Classifier port: trait for the exported prediction model.
//!
//! The pipeline only needs a class index and, when the model family supports
//! it, per-class probabilities. Which model family produced the artifact is
//! an adapter concern.

use thiserror::Error;

/// Raw outcome of one classifier run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    /// Predicted class index (position in the exported class list)
    pub class_index: usize,

    /// Per-class probabilities, when the model family exposes them.
    /// Indices line up with class indices; values sum to ~1.
    pub probabilities: Option<Vec<f64>>,
}

impl ClassifierOutput {
    /// Highest class probability, when probabilities are available.
    #[must_use]
    pub fn max_probability(&self) -> Option<f64> {
        self.probabilities
            .as_ref()
            .map(|p| p.iter().copied().fold(f64::MIN, f64::max))
    }
}

/// Errors from classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// Input vector length does not match the exported coefficients.
    #[error("classifier expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The computation degenerated or the artifacts disagree at runtime.
    #[error("classifier computation failed: {0}")]
    Computation(String),
}

/// Trait for replaying an exported classifier.
pub trait Classifier: Send + Sync {
    /// Predict the class of an already-scaled feature vector.
    ///
    /// # Errors
    /// Returns [`ClassifierError::DimensionMismatch`] when the input length
    /// does not match the exported coefficients,
    /// [`ClassifierError::Computation`] when the arithmetic degenerates.
    fn predict(&self, features: &[f64]) -> Result<ClassifierOutput, ClassifierError>;

    /// Number of features the classifier was trained on.
    fn dimension(&self) -> usize;

    /// Number of classes the classifier distinguishes.
    fn class_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_probability() {
        let output = ClassifierOutput {
            class_index: 1,
            probabilities: Some(vec![0.2, 0.8]),
        };
        assert!((output.max_probability().expect("probabilities present") - 0.8).abs() < 1e-12);

        let opaque = ClassifierOutput {
            class_index: 1,
            probabilities: None,
        };
        assert!(opaque.max_probability().is_none());
    }
}
