//! Adapters layer: concrete implementations of the ports.
//!
//! - `artifacts`: JSON artifacts exported by the training pipeline, backing
//!   the [`Scaler`](crate::ports::Scaler) and
//!   [`Classifier`](crate::ports::Classifier) ports plus the encoder and
//!   imputation tables.

pub mod artifacts;

pub use artifacts::{
    ArtifactError, ArtifactStore, ArtifactSummary, ExportedClassifier, LabelEncoder, MeanTable,
    StandardScaler, UnknownCategory,
};
