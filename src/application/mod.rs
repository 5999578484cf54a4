//! Application layer: services orchestrating domain types and ports.

mod assembly;
mod inference;

pub use assembly::{AssemblyError, FeatureAssembler};
pub use inference::PredictionService;
