//! Exported label encoder.
//!
//! A class list where position is the integer code, as exported from the
//! training pipeline's fitted `LabelEncoder`. Lookups are case- and
//! whitespace-insensitive: the form upper-cases what it shows while the
//! artifact may carry training-case names, and that mismatch must not turn
//! valid input into an unknown category.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A category value the exported encoder has never seen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {value:?} (known: {})", .known.join(", "))]
pub struct UnknownCategory {
    pub value: String,
    pub known: Vec<String>,
}

/// Exported category-to-code mapping; index in `classes` is the code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

impl LabelEncoder {
    /// Build an encoder from an ordered class list.
    #[must_use]
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Check the exported classes for internal consistency.
    ///
    /// # Errors
    /// Returns a description of the first defect: no classes, a blank class
    /// name, or two classes that collide once normalized.
    pub fn verify(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("encoder has no classes".to_string());
        }
        let mut seen = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let n = normalize(class);
            if n.is_empty() {
                return Err("encoder contains a blank class name".to_string());
            }
            if seen.contains(&n) {
                return Err(format!("classes collide after normalization: {n:?}"));
            }
            seen.push(n);
        }
        Ok(())
    }

    /// Integer code for a category.
    ///
    /// # Errors
    /// Returns [`UnknownCategory`] with the normalized known classes when
    /// the value is not in the exported list.
    pub fn encode(&self, value: &str) -> Result<usize, UnknownCategory> {
        let query = normalize(value);
        self.classes
            .iter()
            .position(|c| normalize(c) == query)
            .ok_or_else(|| UnknownCategory {
                value: value.to_string(),
                known: self.normalized_classes(),
            })
    }

    /// Original class name for a code, as spelled in the artifact.
    #[must_use]
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    /// Normalized class names in code order.
    #[must_use]
    pub fn normalized_classes(&self) -> Vec<String> {
        self.classes.iter().map(|c| normalize(c)).collect()
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the encoder has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genders() -> LabelEncoder {
        LabelEncoder::new(vec!["F".to_string(), "M".to_string()])
    }

    #[test]
    fn test_encode_is_case_and_whitespace_insensitive() {
        let encoder = genders();

        assert_eq!(encoder.encode("M").expect("known"), 1);
        assert_eq!(encoder.encode("m").expect("known"), 1);
        assert_eq!(encoder.encode(" f ").expect("known"), 0);
    }

    #[test]
    fn test_training_case_classes_match_uppercased_input() {
        // Artifact exported with training-case names, form posts upper-case.
        let encoder = LabelEncoder::new(vec!["Female".to_string(), "Male".to_string()]);

        assert_eq!(encoder.encode("MALE").expect("known"), 1);
        assert_eq!(encoder.encode("FEMALE").expect("known"), 0);
    }

    #[test]
    fn test_unknown_category_carries_known_classes() {
        let err = genders().encode("X").expect_err("unknown");

        assert_eq!(err.value, "X");
        assert_eq!(err.known, vec!["F".to_string(), "M".to_string()]);
    }

    #[test]
    fn test_decode_returns_artifact_spelling() {
        let encoder = LabelEncoder::new(vec!["No".to_string(), "Yes".to_string()]);

        assert_eq!(encoder.decode(1), Some("Yes"));
        assert_eq!(encoder.decode(2), None);
    }

    #[test]
    fn test_verify_rejects_collisions_and_blanks() {
        let colliding = LabelEncoder::new(vec!["m".to_string(), "M ".to_string()]);
        assert!(colliding.verify().is_err());

        let blank = LabelEncoder::new(vec!["F".to_string(), "  ".to_string()]);
        assert!(blank.verify().is_err());

        let empty = LabelEncoder::new(vec![]);
        assert!(empty.verify().is_err());

        assert!(genders().verify().is_ok());
    }
}
