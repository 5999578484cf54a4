//! Exported training-column means.
//!
//! The imputation table: one mean per training column, used to fill the
//! feature slots a request does not supply. Lookup failures are per-request
//! errors, not load errors, since the table may legitimately carry a
//! different column set across artifact versions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column-name to training-mean mapping from `column_means.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeanTable {
    columns: BTreeMap<String, f64>,
}

impl MeanTable {
    /// Build a table from name/mean pairs.
    #[must_use]
    pub fn from_pairs<S, I>(pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        Self {
            columns: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Check the exported means for internal consistency.
    ///
    /// # Errors
    /// Returns a description of the first non-finite mean.
    pub fn verify(&self) -> Result<(), String> {
        for (column, mean) in &self.columns {
            if !mean.is_finite() {
                return Err(format!("mean for {column:?} is not finite"));
            }
        }
        Ok(())
    }

    /// Training mean for a column, by exact name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns.get(column).copied()
    }

    /// Number of columns in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let table = MeanTable::from_pairs([("Urea", 5.12), ("BMI", 29.58)]);

        assert!((table.get("Urea").expect("present") - 5.12).abs() < f64::EPSILON);
        assert!(table.get("urea").is_none());
        assert!(table.get("HDL").is_none());
    }

    #[test]
    fn test_parses_plain_json_object() {
        let table: MeanTable =
            serde_json::from_str(r#"{"Urea": 30.0, "Cr": 0.9}"#).expect("should parse");

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().collect::<Vec<_>>(), vec!["Cr", "Urea"]);
    }

    #[test]
    fn test_verify_rejects_non_finite_means() {
        let table = MeanTable::from_pairs([("Urea", f64::NAN)]);
        assert!(table.verify().is_err());

        let table = MeanTable::from_pairs([("Urea", 5.12)]);
        assert!(table.verify().is_ok());
    }
}
