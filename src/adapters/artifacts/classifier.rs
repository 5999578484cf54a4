//! Exported classifier parameters.
//!
//! Replays the trained model from `classifier.json`. Two exported families
//! are supported: logistic regression (probabilities available) and a
//! margin-only linear model (sign of the decision value, no probabilities).

use serde::{Deserialize, Serialize};

use crate::ports::{Classifier, ClassifierError, ClassifierOutput};

fn default_threshold() -> f64 {
    0.5
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportedClassifier {
    /// Logistic regression over the scaled features.
    Logistic {
        coefficients: Vec<f64>,
        intercept: f64,
        /// Decision threshold on the positive-class probability.
        #[serde(default = "default_threshold")]
        threshold: f64,
    },

    /// Linear model exposing only the decision margin (e.g. a linear SVM).
    LinearMargin { coefficients: Vec<f64>, intercept: f64 },
}

impl ExportedClassifier {
    /// Exported family tag, as written in the artifact.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Logistic { .. } => "logistic",
            Self::LinearMargin { .. } => "linear_margin",
        }
    }

    fn coefficients(&self) -> &[f64] {
        match self {
            Self::Logistic { coefficients, .. } | Self::LinearMargin { coefficients, .. } => {
                coefficients
            }
        }
    }

    fn intercept(&self) -> f64 {
        match self {
            Self::Logistic { intercept, .. } | Self::LinearMargin { intercept, .. } => *intercept,
        }
    }

    /// Check the exported parameters for internal consistency.
    ///
    /// # Errors
    /// Returns a description of the first defect: empty or non-finite
    /// coefficients, or a logistic threshold outside `(0, 1)`.
    pub fn verify(&self) -> Result<(), String> {
        let coefficients = self.coefficients();
        if coefficients.is_empty() {
            return Err("classifier has no coefficients".to_string());
        }
        for (i, c) in coefficients.iter().enumerate() {
            if !c.is_finite() {
                return Err(format!("coefficient[{i}] is not finite"));
            }
        }
        if !self.intercept().is_finite() {
            return Err("intercept is not finite".to_string());
        }
        if let Self::Logistic { threshold, .. } = self {
            if !threshold.is_finite() || *threshold <= 0.0 || *threshold >= 1.0 {
                return Err(format!("threshold {threshold} must lie in (0, 1)"));
            }
        }
        Ok(())
    }

    /// Decision value before any link function.
    fn linear_term(&self, features: &[f64]) -> f64 {
        self.coefficients()
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Classifier for ExportedClassifier {
    fn predict(&self, features: &[f64]) -> Result<ClassifierOutput, ClassifierError> {
        let expected = self.dimension();
        if features.len() != expected {
            return Err(ClassifierError::DimensionMismatch {
                expected,
                actual: features.len(),
            });
        }

        let z = self.linear_term(features);
        if !z.is_finite() {
            return Err(ClassifierError::Computation(
                "decision value is not finite".to_string(),
            ));
        }

        match self {
            Self::Logistic { threshold, .. } => {
                let p = sigmoid(z);
                Ok(ClassifierOutput {
                    class_index: usize::from(p >= *threshold),
                    probabilities: Some(vec![1.0 - p, p]),
                })
            }
            Self::LinearMargin { .. } => Ok(ClassifierOutput {
                class_index: usize::from(z >= 0.0),
                probabilities: None,
            }),
        }
    }

    fn dimension(&self) -> usize {
        self.coefficients().len()
    }

    fn class_count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logistic(coefficients: Vec<f64>, intercept: f64) -> ExportedClassifier {
        ExportedClassifier::Logistic {
            coefficients,
            intercept,
            threshold: 0.5,
        }
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn test_logistic_prediction_and_probabilities() {
        let model = logistic(vec![1.0, 1.0], 0.0);

        let out = model.predict(&[2.0, 2.0]).expect("should predict");
        assert_eq!(out.class_index, 1);
        let probs = out.probabilities.expect("logistic exposes probabilities");
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!(probs[1] > 0.9);

        let out = model.predict(&[-2.0, -2.0]).expect("should predict");
        assert_eq!(out.class_index, 0);
    }

    #[test]
    fn test_threshold_moves_the_decision() {
        // p = sigmoid(0.4) ~ 0.599: positive at 0.5, negative at 0.7.
        let lenient = ExportedClassifier::Logistic {
            coefficients: vec![1.0],
            intercept: 0.0,
            threshold: 0.5,
        };
        let strict = ExportedClassifier::Logistic {
            coefficients: vec![1.0],
            intercept: 0.0,
            threshold: 0.7,
        };

        assert_eq!(lenient.predict(&[0.4]).expect("predict").class_index, 1);
        assert_eq!(strict.predict(&[0.4]).expect("predict").class_index, 0);
    }

    #[test]
    fn test_margin_model_has_no_probabilities() {
        let model = ExportedClassifier::LinearMargin {
            coefficients: vec![1.0, -1.0],
            intercept: 0.0,
        };

        let out = model.predict(&[3.0, 1.0]).expect("should predict");
        assert_eq!(out.class_index, 1);
        assert!(out.probabilities.is_none());

        let out = model.predict(&[1.0, 3.0]).expect("should predict");
        assert_eq!(out.class_index, 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = logistic(vec![1.0, 1.0], 0.0);

        let err = model.predict(&[1.0]).expect_err("must reject");
        assert_eq!(
            err,
            ClassifierError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_threshold_defaults_when_absent() {
        let model: ExportedClassifier = serde_json::from_str(
            r#"{"kind": "logistic", "coefficients": [0.5], "intercept": 0.1}"#,
        )
        .expect("should parse");

        match model {
            ExportedClassifier::Logistic { threshold, .. } => {
                assert!((threshold - 0.5).abs() < f64::EPSILON);
            }
            ExportedClassifier::LinearMargin { .. } => panic!("parsed wrong kind"),
        }
    }

    #[test]
    fn test_verify_rejects_bad_parameters() {
        assert!(logistic(vec![], 0.0).verify().is_err());
        assert!(logistic(vec![f64::NAN], 0.0).verify().is_err());

        let bad_threshold = ExportedClassifier::Logistic {
            coefficients: vec![1.0],
            intercept: 0.0,
            threshold: 1.0,
        };
        assert!(bad_threshold.verify().is_err());

        assert!(logistic(vec![1.0], 0.0).verify().is_ok());
    }
}
