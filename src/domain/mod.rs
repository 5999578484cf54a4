//! Domain layer: core screening types.
//!
//! Pure types with no knowledge of artifacts or transport: the request
//! input, the feature layout contract, and the rendered outcome.

mod features;
mod observation;
mod prediction;

pub use features::{FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT, MEAN_IMPUTED_COLUMNS};
pub use observation::{Observation, ValidationError};
pub use prediction::{PositivePolicy, Prediction, PredictionLabel};
