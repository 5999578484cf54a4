//! Exported `StandardScaler` parameters.
//!
//! Replays the offline preprocessing step: `(x - mean) / scale` per column,
//! using the parameters the training pipeline exported to `scaler.json`.

use serde::{Deserialize, Serialize};

use crate::ports::{Scaler, ScalerError};

/// Per-column standardization parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler from raw parameter vectors.
    #[must_use]
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Check the exported parameters for internal consistency.
    ///
    /// # Errors
    /// Returns a description of the first defect: length mismatch, empty
    /// parameters, non-finite values, or a zero scale (which would divide
    /// every request by zero).
    pub fn verify(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler parameters are empty".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        for (i, m) in self.mean.iter().enumerate() {
            if !m.is_finite() {
                return Err(format!("mean[{i}] is not finite"));
            }
        }
        for (i, s) in self.scale.iter().enumerate() {
            if !s.is_finite() || *s == 0.0 {
                return Err(format!("scale[{i}] must be finite and non-zero"));
            }
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScalerError> {
        if features.len() != self.mean.len() {
            return Err(ScalerError::DimensionMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        let mut out = Vec::with_capacity(features.len());
        for (i, &x) in features.iter().enumerate() {
            let v = (x - self.mean[i]) / self.scale[i];
            if !v.is_finite() {
                return Err(ScalerError::NonFinite { index: i });
            }
            out.push(v);
        }
        Ok(out)
    }

    fn dimension(&self) -> usize {
        self.mean.len()
    }
}
