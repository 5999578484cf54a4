//! Screening outcome types.
//!
//! Represents the rendered result of a classifier run, plus the policy that
//! maps raw classifier outcomes onto the Yes/No answer.

use serde::Serialize;

/// Binary screening answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionLabel {
    Yes,
    No,
}

impl PredictionLabel {
    /// Per-outcome guidance shown alongside the answer.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Yes => "Likely diabetic. Consult a doctor immediately.",
            Self::No => "Not likely diabetic. Keep monitoring regularly.",
        }
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// Outcome of one screening request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Rendered answer
    pub label: PredictionLabel,

    /// Raw class index the classifier emitted
    pub class_index: usize,

    /// Decoded class name, when a class encoder was exported
    pub class_name: Option<String>,

    /// Max class probability as a percentage (50-100), when the classifier
    /// exposes probabilities
    pub confidence: Option<f64>,
}

/// Decides which raw classifier outcome reads as "Yes".
///
/// When a class encoder is present the decoded class name is matched against
/// the marker set (case-insensitive). Without one, only the raw class index
/// is available and the positive index decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositivePolicy {
    markers: Vec<String>,
    positive_index: usize,
}

impl PositivePolicy {
    /// Build a policy from marker names. Markers are trimmed, upper-cased
    /// and deduplicated; empty entries are dropped.
    #[must_use]
    pub fn new(markers: &[&str], positive_index: usize) -> Self {
        let mut normalized: Vec<String> = markers
            .iter()
            .map(|m| m.trim().to_uppercase())
            .filter(|m| !m.is_empty())
            .collect();
        normalized.sort();
        normalized.dedup();

        Self {
            markers: normalized,
            positive_index,
        }
    }

    /// Marker names this policy treats as positive.
    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Classify a raw outcome.
    #[must_use]
    pub fn is_positive(&self, class_index: usize, class_name: Option<&str>) -> bool {
        match class_name {
            Some(name) => self.markers.contains(&name.trim().to_uppercase()),
            None => class_index == self.positive_index,
        }
    }

    /// Fold a raw outcome into the rendered label.
    #[must_use]
    pub fn label(&self, class_index: usize, class_name: Option<&str>) -> PredictionLabel {
        if self.is_positive(class_index, class_name) {
            PredictionLabel::Yes
        } else {
            PredictionLabel::No
        }
    }
}

impl Default for PositivePolicy {
    /// Default markers cover the exported label sets seen in practice:
    /// diabetic (`Y`/`YES`) and prediabetic (`P`) both screen positive.
    fn default() -> Self {
        Self::new(&["Y", "YES", "P"], 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_renders_exact_strings() {
        assert_eq!(PredictionLabel::Yes.to_string(), "Yes");
        assert_eq!(PredictionLabel::No.to_string(), "No");
    }

    #[test]
    fn test_default_policy_markers() {
        let policy = PositivePolicy::default();

        assert_eq!(policy.label(0, Some("Y")), PredictionLabel::Yes);
        assert_eq!(policy.label(0, Some("p")), PredictionLabel::Yes);
        assert_eq!(policy.label(1, Some(" yes ")), PredictionLabel::Yes);
        assert_eq!(policy.label(1, Some("N")), PredictionLabel::No);
    }

    #[test]
    fn test_index_fallback_without_class_names() {
        let policy = PositivePolicy::default();

        assert_eq!(policy.label(1, None), PredictionLabel::Yes);
        assert_eq!(policy.label(0, None), PredictionLabel::No);
    }

    #[test]
    fn test_custom_markers() {
        let policy = PositivePolicy::new(&["positive", ""], 1);

        assert_eq!(policy.markers(), &["POSITIVE".to_string()]);
        assert_eq!(policy.label(0, Some("Positive")), PredictionLabel::Yes);
        assert_eq!(policy.label(1, Some("Y")), PredictionLabel::No);
    }
}
