//! # Glyscreen
//!
//! Diabetes screening inference service over exported scikit-learn
//! artifacts.
//!
//! This crate provides:
//! - Fixed-order feature assembly with training-mean imputation
//! - Replay of an exported scaler and classifier
//! - An HTTP surface rendering Yes/No screening answers
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core screening types (Observation, FeatureVector, Prediction)
//! - `ports`: Trait definitions for the artifact-backed math
//! - `adapters`: Exported-artifact implementations (JSON parameter files)
//! - `application`: Feature assembly and the prediction pipeline
//! - `server`: axum HTTP surface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;

pub use config::Config;
pub use domain::{Observation, Prediction, PredictionLabel};

/// Result type for Glyscreen operations
pub type Result<T> = std::result::Result<T, GlyscreenError>;

/// Main error type for Glyscreen
#[derive(Debug, thiserror::Error)]
pub enum GlyscreenError {
    #[error("Invalid observation: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Feature assembly failed: {0}")]
    Assembly(#[from] application::AssemblyError),

    #[error("Feature scaling failed: {0}")]
    Scaler(#[from] ports::ScalerError),

    #[error("Classification failed: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Artifact loading failed: {0}")]
    Artifacts(#[from] adapters::ArtifactError),

    #[error("Configuration error: {0}")]
    Config(String),
}
