//! Ports layer: trait definitions for the artifact-backed math.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the screening pipeline and the exported-model adapters.

mod classifier;
mod scaler;

pub use classifier::{Classifier, ClassifierError, ClassifierOutput};
pub use scaler::{Scaler, ScalerError};
