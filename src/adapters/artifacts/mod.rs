//! Exported-artifact loading.
//!
//! The training pipeline exports everything the service needs as JSON files
//! in one directory. [`ArtifactStore::load`] reads them once at startup and
//! fails fast on anything inconsistent; a service that cannot classify must
//! never start answering.
//!
//! | file                  | required | content                           |
//! |-----------------------|----------|-----------------------------------|
//! | `classifier.json`     | yes      | tagged model parameters           |
//! | `scaler.json`         | yes      | per-column mean and scale         |
//! | `gender_encoder.json` | yes      | class list, index = code          |
//! | `class_encoder.json`  | no       | class list for decoding outcomes  |
//! | `column_means.json`   | yes      | column name to training mean      |

mod classifier;
mod encoder;
mod means;
mod scaler;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::FEATURE_COUNT;
use crate::ports::{Classifier, Scaler};

pub use classifier::ExportedClassifier;
pub use encoder::{LabelEncoder, UnknownCategory};
pub use means::MeanTable;
pub use scaler::StandardScaler;

/// Classifier parameter file.
pub const CLASSIFIER_FILE: &str = "classifier.json";
/// Scaler parameter file.
pub const SCALER_FILE: &str = "scaler.json";
/// Gender encoder file.
pub const GENDER_ENCODER_FILE: &str = "gender_encoder.json";
/// Optional class encoder file.
pub const CLASS_ENCODER_FILE: &str = "class_encoder.json";
/// Imputation means file.
pub const COLUMN_MEANS_FILE: &str = "column_means.json";

const REQUIRED_FILES: [&str; 4] = [
    CLASSIFIER_FILE,
    SCALER_FILE,
    GENDER_ENCODER_FILE,
    COLUMN_MEANS_FILE,
];

/// Errors while loading the artifact directory.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// One or more required files are absent. Lists every absence at once
    /// so an operator fixes the directory in one pass.
    #[error("missing artifact files: {}", .0.join(", "))]
    MissingFiles(Vec<String>),

    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// The files parsed but disagree with each other or with the feature
    /// layout.
    #[error("inconsistent artifacts: {0}")]
    Inconsistent(String),
}

/// Everything the training pipeline exported, loaded and cross-checked.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub scaler: StandardScaler,
    pub classifier: ExportedClassifier,
    pub gender_encoder: LabelEncoder,
    pub class_encoder: Option<LabelEncoder>,
    pub means: MeanTable,
}

/// Operator-facing digest of a loaded artifact set.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub classifier_kind: &'static str,
    pub feature_count: usize,
    pub genders: Vec<String>,
    pub class_names: Option<Vec<String>>,
    pub mean_columns: usize,
}

impl ArtifactStore {
    /// Load and cross-check the artifact directory.
    ///
    /// # Errors
    /// Returns [`ArtifactError::MissingFiles`] listing every absent required
    /// file, a read/parse error naming the offending file, or
    /// [`ArtifactError::Inconsistent`] when the files disagree with each
    /// other or with the feature layout.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let missing: Vec<String> = REQUIRED_FILES
            .iter()
            .filter(|file| !dir.join(file).exists())
            .map(|file| (*file).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ArtifactError::MissingFiles(missing));
        }

        let scaler: StandardScaler = read_json(dir, SCALER_FILE)?;
        let classifier: ExportedClassifier = read_json(dir, CLASSIFIER_FILE)?;
        let gender_encoder: LabelEncoder = read_json(dir, GENDER_ENCODER_FILE)?;
        let means: MeanTable = read_json(dir, COLUMN_MEANS_FILE)?;
        let class_encoder: Option<LabelEncoder> = if dir.join(CLASS_ENCODER_FILE).exists() {
            Some(read_json(dir, CLASS_ENCODER_FILE)?)
        } else {
            None
        };

        verify(SCALER_FILE, scaler.verify())?;
        verify(CLASSIFIER_FILE, classifier.verify())?;
        verify(GENDER_ENCODER_FILE, gender_encoder.verify())?;
        verify(COLUMN_MEANS_FILE, means.verify())?;
        if let Some(encoder) = &class_encoder {
            verify(CLASS_ENCODER_FILE, encoder.verify())?;
        }

        if scaler.dimension() != FEATURE_COUNT {
            return Err(ArtifactError::Inconsistent(format!(
                "{SCALER_FILE}: fitted on {} features, the feature layout has {FEATURE_COUNT}",
                scaler.dimension()
            )));
        }
        if classifier.dimension() != FEATURE_COUNT {
            return Err(ArtifactError::Inconsistent(format!(
                "{CLASSIFIER_FILE}: trained on {} features, the feature layout has {FEATURE_COUNT}",
                classifier.dimension()
            )));
        }
        if let Some(encoder) = &class_encoder {
            if encoder.len() != classifier.class_count() {
                return Err(ArtifactError::Inconsistent(format!(
                    "{CLASS_ENCODER_FILE}: {} classes, classifier distinguishes {}",
                    encoder.len(),
                    classifier.class_count()
                )));
            }
        }

        let store = Self {
            scaler,
            classifier,
            gender_encoder,
            class_encoder,
            means,
        };

        let summary = store.summary();
        tracing::info!(
            "Loaded artifacts from {:?} (classifier={}, genders={:?}, classes={:?}, mean_columns={})",
            dir,
            summary.classifier_kind,
            summary.genders,
            summary.class_names,
            summary.mean_columns
        );

        Ok(store)
    }

    /// Digest for startup logs, health reporting and the preflight tool.
    #[must_use]
    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            classifier_kind: self.classifier.kind(),
            feature_count: self.classifier.dimension(),
            genders: self.gender_encoder.normalized_classes(),
            class_names: self
                .class_encoder
                .as_ref()
                .map(LabelEncoder::normalized_classes),
            mean_columns: self.means.len(),
        }
    }
}

fn verify(file: &str, result: Result<(), String>) -> Result<(), ArtifactError> {
    result.map_err(|msg| ArtifactError::Inconsistent(format!("{file}: {msg}")))
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, ArtifactError> {
    let path = dir.join(file);
    let content = std::fs::read_to_string(&path).map_err(|e| ArtifactError::Read {
        file: file.to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactError::Parse {
        file: file.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_json<T: Serialize>(dir: &Path, file: &str, value: &T) {
        let json = serde_json::to_string_pretty(value).expect("serialize artifact");
        std::fs::write(dir.join(file), json).expect("write artifact");
    }

    fn write_default_fixture(dir: &Path) {
        write_json(
            dir,
            SCALER_FILE,
            &StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]),
        );
        write_json(
            dir,
            CLASSIFIER_FILE,
            &ExportedClassifier::Logistic {
                coefficients: vec![0.1; FEATURE_COUNT],
                intercept: -0.5,
                threshold: 0.5,
            },
        );
        write_json(
            dir,
            GENDER_ENCODER_FILE,
            &LabelEncoder::new(vec!["F".to_string(), "M".to_string()]),
        );
        write_json(
            dir,
            CLASS_ENCODER_FILE,
            &LabelEncoder::new(vec!["N".to_string(), "Y".to_string()]),
        );
        write_json(
            dir,
            COLUMN_MEANS_FILE,
            &MeanTable::from_pairs([
                ("Urea", 5.12),
                ("Cr", 68.94),
                ("Chol", 4.86),
                ("TG", 2.35),
                ("HDL", 1.2),
                ("LDL", 2.61),
                ("VLDL", 1.85),
                ("BMI", 29.58),
            ]),
        );
    }

    #[test]
    fn test_load_full_fixture() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());

        let store = ArtifactStore::load(temp.path()).expect("should load");
        let summary = store.summary();

        assert_eq!(summary.classifier_kind, "logistic");
        assert_eq!(summary.feature_count, FEATURE_COUNT);
        assert_eq!(summary.genders, vec!["F".to_string(), "M".to_string()]);
        assert_eq!(
            summary.class_names,
            Some(vec!["N".to_string(), "Y".to_string()])
        );
        assert_eq!(summary.mean_columns, 8);
    }

    #[test]
    fn test_class_encoder_is_optional() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());
        std::fs::remove_file(temp.path().join(CLASS_ENCODER_FILE)).expect("remove file");

        let store = ArtifactStore::load(temp.path()).expect("should load");
        assert!(store.class_encoder.is_none());
        assert!(store.summary().class_names.is_none());
    }

    #[test]
    fn test_missing_files_are_all_listed() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());
        std::fs::remove_file(temp.path().join(SCALER_FILE)).expect("remove file");
        std::fs::remove_file(temp.path().join(COLUMN_MEANS_FILE)).expect("remove file");

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        match err {
            ArtifactError::MissingFiles(files) => {
                assert_eq!(
                    files,
                    vec![SCALER_FILE.to_string(), COLUMN_MEANS_FILE.to_string()]
                );
            }
            other => panic!("expected MissingFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());
        std::fs::write(temp.path().join(SCALER_FILE), "not json").expect("write garbage");

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        match err {
            ArtifactError::Parse { file, .. } => assert_eq!(file, SCALER_FILE),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_scaler_dimension_cross_checked() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());
        write_json(
            temp.path(),
            SCALER_FILE,
            &StandardScaler::new(vec![0.0; 3], vec![1.0; 3]),
        );

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, ArtifactError::Inconsistent(msg) if msg.contains(SCALER_FILE)));
    }

    #[test]
    fn test_class_encoder_size_cross_checked() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());
        write_json(
            temp.path(),
            CLASS_ENCODER_FILE,
            &LabelEncoder::new(vec!["N".to_string(), "P".to_string(), "Y".to_string()]),
        );

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        assert!(
            matches!(err, ArtifactError::Inconsistent(msg) if msg.contains(CLASS_ENCODER_FILE))
        );
    }

    #[test]
    fn test_degenerate_parameters_rejected() {
        let temp = tempdir().expect("tempdir");
        write_default_fixture(temp.path());
        write_json(
            temp.path(),
            SCALER_FILE,
            &StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![0.0; FEATURE_COUNT]),
        );

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, ArtifactError::Inconsistent(_)));
    }

    #[test]
    fn test_shipped_artifacts_load() {
        let store = ArtifactStore::load(Path::new("artifacts")).expect("shipped set should load");

        let summary = store.summary();
        assert_eq!(summary.feature_count, FEATURE_COUNT);
        assert!(!summary.genders.is_empty());
    }
}
