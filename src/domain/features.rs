//! Feature vector layout shared by the scaler and the classifier.
//!
//! The exported model was trained on a fixed column order; position is
//! meaning. Every vector that reaches the scaler MUST follow
//! [`FEATURE_COLUMNS`] exactly.

/// Number of columns the exported model consumes.
pub const FEATURE_COUNT: usize = 11;

/// Column order the classifier was trained on.
///
/// Index 0 is the encoded gender, the rest are numeric measurements in
/// training-frame order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Gender", "AGE", "Urea", "Cr", "HbA1c", "Chol", "TG", "HDL", "LDL", "VLDL", "BMI",
];

/// Columns filled from the training-means table when the request does not
/// carry an override.
pub const MEAN_IMPUTED_COLUMNS: [&str; 8] =
    ["Urea", "Cr", "Chol", "TG", "HDL", "LDL", "VLDL", "BMI"];

/// A fully assembled model input in [`FEATURE_COLUMNS`] order.
///
/// Only the assembler constructs these, which is what keeps the order
/// contract in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap an already-ordered array of feature values.
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Borrow the values in model order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of a named column, if the name is part of the layout.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<f64> {
        FEATURE_COLUMNS
            .iter()
            .position(|c| *c == name)
            .map(|i| self.0[i])
    }

    /// Consume the vector, yielding the raw array.
    #[must_use]
    pub fn into_inner(self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
