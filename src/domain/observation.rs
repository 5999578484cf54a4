//! Screening request input.
//!
//! An [`Observation`] is the raw per-request payload: the three measurements
//! the form always collects plus the optional overrides. Everything else in
//! the model's feature layout is imputed from training means downstream.

use serde::Deserialize;
use thiserror::Error;

/// A single screening request.
///
/// Optional fields override the training-mean imputation for their column
/// when present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Observation {
    /// Age in years (1-120)
    pub age: u32,

    /// Gender as a category known to the exported encoder (case-insensitive)
    pub gender: String,

    /// Glycated hemoglobin HbA1c in % (0-20)
    pub hba1c: f64,

    /// Body mass index in kg/m², overrides the training mean when present
    #[serde(default)]
    pub bmi: Option<f64>,

    /// Total cholesterol in mmol/L, overrides the training mean when present
    #[serde(default)]
    pub cholesterol: Option<f64>,

    /// Triglycerides in mmol/L, overrides the training mean when present
    #[serde(default)]
    pub triglycerides: Option<f64>,
}

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} {value} out of range {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: String },

    #[error("gender must not be empty")]
    EmptyGender,
}

impl Observation {
    /// Validate every field against its accepted range.
    ///
    /// # Errors
    /// Returns the first offending field. A non-finite or out-of-range
    /// measurement would otherwise skew the scaled vector without any
    /// operator signal.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=120).contains(&self.age) {
            return Err(ValidationError::OutOfRange {
                field: "age",
                value: self.age.to_string(),
                expected: "[1, 120]",
            });
        }

        if self.gender.trim().is_empty() {
            return Err(ValidationError::EmptyGender);
        }

        if !self.hba1c.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "hba1c",
                value: self.hba1c.to_string(),
            });
        }
        if !(0.0..=20.0).contains(&self.hba1c) {
            return Err(ValidationError::OutOfRange {
                field: "hba1c",
                value: self.hba1c.to_string(),
                expected: "[0, 20]",
            });
        }

        check_positive("bmi", self.bmi)?;
        check_positive("cholesterol", self.cholesterol)?;
        check_positive("triglycerides", self.triglycerides)?;

        Ok(())
    }

    /// Names of the optional columns this observation overrides.
    #[must_use]
    pub fn overridden_columns(&self) -> Vec<&'static str> {
        let mut cols = Vec::new();
        if self.bmi.is_some() {
            cols.push("BMI");
        }
        if self.cholesterol.is_some() {
            cols.push("Chol");
        }
        if self.triglycerides.is_some() {
            cols.push("TG");
        }
        cols
    }
}

fn check_positive(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    let Some(v) = value else { return Ok(()) };

    if !v.is_finite() {
        return Err(ValidationError::NotFinite {
            field,
            value: v.to_string(),
        });
    }
    if v <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value: v.to_string(),
            expected: "(0, inf)",
        });
    }
    Ok(())
}
