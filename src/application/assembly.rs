//! Feature assembly: one observation in, one ordered model input out.
//!
//! This is the only place that builds [`FeatureVector`]s. Slots the request
//! carries (gender, age, HbA1c and any overrides) are filled directly; every
//! other column comes from the exported training means.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::{LabelEncoder, MeanTable, UnknownCategory};
use crate::domain::{FeatureVector, Observation, FEATURE_COLUMNS, FEATURE_COUNT};

/// Errors while turning an observation into a feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The request carried a gender the exported encoder has never seen.
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    /// The means table lacks a column the feature layout needs. This is an
    /// artifact defect, not a caller mistake.
    #[error("means table has no entry for column {column:?}")]
    MissingMeanColumn { column: &'static str },
}

/// Builds model inputs in [`FEATURE_COLUMNS`] order.
pub struct FeatureAssembler {
    gender_encoder: Arc<LabelEncoder>,
    means: Arc<MeanTable>,
}

impl FeatureAssembler {
    /// Create an assembler over the exported encoder and means table.
    #[must_use]
    pub fn new(gender_encoder: Arc<LabelEncoder>, means: Arc<MeanTable>) -> Self {
        Self {
            gender_encoder,
            means,
        }
    }

    /// Normalized gender categories the encoder accepts.
    #[must_use]
    pub fn known_genders(&self) -> Vec<String> {
        self.gender_encoder.normalized_classes()
    }

    /// Assemble the full feature vector for one observation.
    ///
    /// # Errors
    /// Returns [`AssemblyError::UnknownCategory`] for a gender outside the
    /// encoder, [`AssemblyError::MissingMeanColumn`] when an imputed column
    /// has no training mean.
    pub fn assemble(&self, observation: &Observation) -> Result<FeatureVector, AssemblyError> {
        let gender = self.gender_encoder.encode(&observation.gender)? as f64;

        let mut values = [0.0; FEATURE_COUNT];
        for (i, column) in FEATURE_COLUMNS.into_iter().enumerate() {
            values[i] = match column {
                "Gender" => gender,
                "AGE" => f64::from(observation.age),
                "HbA1c" => observation.hba1c,
                "BMI" => self.override_or_mean(column, observation.bmi)?,
                "Chol" => self.override_or_mean(column, observation.cholesterol)?,
                "TG" => self.override_or_mean(column, observation.triglycerides)?,
                other => self.mean(other)?,
            };
        }

        let overridden = observation.overridden_columns().len();
        tracing::debug!(
            "Assembled {} features ({} overridden, {} mean-imputed)",
            FEATURE_COUNT,
            overridden,
            FEATURE_COUNT - 3 - overridden
        );

        Ok(FeatureVector::new(values))
    }

    fn override_or_mean(
        &self,
        column: &'static str,
        value: Option<f64>,
    ) -> Result<f64, AssemblyError> {
        match value {
            Some(v) => Ok(v),
            None => self.mean(column),
        }
    }

    fn mean(&self, column: &'static str) -> Result<f64, AssemblyError> {
        self.means
            .get(column)
            .ok_or(AssemblyError::MissingMeanColumn { column })
    }
}
