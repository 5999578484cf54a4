//! Prediction service: orchestrates the screening pipeline.
//!
//! Per request: validate the observation, assemble the feature vector,
//! scale it, classify it, decode the class and fold it through the positive
//! policy. Nothing here draws randomness or mutates state, so identical
//! observations always yield identical predictions.

use std::sync::Arc;

use crate::adapters::LabelEncoder;
use crate::application::FeatureAssembler;
use crate::domain::{Observation, PositivePolicy, Prediction};
use crate::ports::{Classifier, ClassifierError, Scaler};
use crate::GlyscreenError;

/// Service for running the screening pipeline over loaded artifacts.
pub struct PredictionService<S, C>
where
    S: Scaler,
    C: Classifier,
{
    assembler: FeatureAssembler,
    scaler: Arc<S>,
    classifier: Arc<C>,
    class_decoder: Option<Arc<LabelEncoder>>,
    policy: PositivePolicy,
}

impl<S, C> PredictionService<S, C>
where
    S: Scaler,
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(
        assembler: FeatureAssembler,
        scaler: Arc<S>,
        classifier: Arc<C>,
        class_decoder: Option<Arc<LabelEncoder>>,
        policy: PositivePolicy,
    ) -> Self {
        Self {
            assembler,
            scaler,
            classifier,
            class_decoder,
            policy,
        }
    }

    /// Normalized gender categories the pipeline accepts.
    #[must_use]
    pub fn known_genders(&self) -> Vec<String> {
        self.assembler.known_genders()
    }

    /// Run the full screening pipeline on one observation.
    ///
    /// # Errors
    /// Returns a validation or assembly error for caller mistakes, a scaler
    /// or classifier error when the artifact math degenerates.
    pub fn predict(&self, observation: &Observation) -> Result<Prediction, GlyscreenError> {
        observation.validate()?;

        tracing::debug!("Assembling feature vector...");
        let vector = self.assembler.assemble(observation)?;

        tracing::debug!("Scaling features...");
        let scaled = self.scaler.transform(vector.as_slice())?;

        tracing::debug!("Classifying...");
        let output = self.classifier.predict(&scaled)?;

        let class_name = match &self.class_decoder {
            Some(decoder) => Some(
                decoder
                    .decode(output.class_index)
                    .ok_or_else(|| {
                        ClassifierError::Computation(format!(
                            "predicted class {} outside the exported class list",
                            output.class_index
                        ))
                    })?
                    .to_string(),
            ),
            None => None,
        };

        let label = self.policy.label(output.class_index, class_name.as_deref());
        let confidence = output.max_probability().map(|p| p * 100.0);

        match confidence {
            Some(c) => tracing::info!(
                "Prediction complete: label={}, class_index={}, confidence={:.2}%",
                label,
                output.class_index,
                c
            ),
            None => tracing::info!(
                "Prediction complete: label={}, class_index={}",
                label,
                output.class_index
            ),
        }

        Ok(Prediction {
            label,
            class_index: output.class_index,
            class_name,
            confidence,
        })
    }
}
