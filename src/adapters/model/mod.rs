//! Model artifact adapter: Implementation of `Classifier` for exported models.
//!
//! The trained model is shipped as a JSON artifact produced by the training
//! pipeline. Two families are supported:
//!
//! - `gradient_boosted_trees`: an XGBoost-style tree dump. With the
//!   `binary:logistic` objective it also estimates probabilities; with
//!   `binary:hinge` it only emits hard labels.
//! - `logistic_regression`: a linear model with an optional standard scaler.
//!
//! # Integrity
//!
//! If a `<artifact>.sha256` sidecar exists next to the artifact, its digest
//! must match the artifact bytes. Deployments can make the sidecar mandatory
//! (see `AppConfig::require_checksum`).
//!
//! # Schema
//!
//! Every artifact declares its `feature_names`, which must match the
//! application's feature schema exactly, in order. A model trained on a
//! different schema is refused at load time rather than producing silently
//! wrong predictions.

mod logistic;
mod trees;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError, ProbabilityEstimator};

pub use logistic::LogisticRegression;
pub use trees::{GradientBoostedTrees, Objective, Tree, TreeNode};

/// File name suffix of the integrity sidecar.
pub const CHECKSUM_SUFFIX: &str = "sha256";

/// Error type for model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feature schema mismatch: {0}")]
    Schema(String),

    #[error("Malformed model: {0}")]
    Malformed(String),

    #[error("Integrity check failed: {0}")]
    Integrity(String),

    #[error("Checksum sidecar required but not found at {0:?}")]
    MissingChecksum(PathBuf),
}

/// A deserialized model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    GradientBoostedTrees(GradientBoostedTrees),
    LogisticRegression(LogisticRegression),
}

impl ModelArtifact {
    /// Parse and structurally validate an artifact from raw JSON bytes.
    ///
    /// # Errors
    /// Returns `ModelError` if the bytes are not a valid artifact or the
    /// artifact does not match the feature schema.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: Self = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::GradientBoostedTrees(m) => {
                check_feature_names(&m.feature_names)?;
                m.validate()
            }
            Self::LogisticRegression(m) => {
                check_feature_names(&m.feature_names)?;
                m.validate()
            }
        }
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<u8>, ClassifierError> {
        match self {
            Self::GradientBoostedTrees(m) => m.predict(rows),
            Self::LogisticRegression(m) => m.predict(rows),
        }
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        match self {
            Self::GradientBoostedTrees(m) => m.probability_estimator(),
            Self::LogisticRegression(m) => m.probability_estimator(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::GradientBoostedTrees(m) => m.name(),
            Self::LogisticRegression(m) => m.name(),
        }
    }
}

/// Load a model artifact from disk.
///
/// # Errors
/// Returns `ModelError` if the file cannot be read, fails its integrity
/// check, or is not a valid artifact for this feature schema.
pub fn load_model(path: &Path, require_checksum: bool) -> Result<ModelArtifact, ModelError> {
    let bytes = fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    verify_checksum(path, &bytes, require_checksum)?;

    let artifact = ModelArtifact::from_slice(&bytes)?;
    tracing::info!(
        "Loaded model {} from {:?} ({} bytes, probabilities: {})",
        artifact.name(),
        path,
        bytes.len(),
        artifact.probability_estimator().is_some()
    );

    Ok(artifact)
}

/// Path of the integrity sidecar for `artifact`.
#[must_use]
pub fn checksum_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(CHECKSUM_SUFFIX);
    artifact.with_file_name(name)
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn verify_checksum(path: &Path, bytes: &[u8], required: bool) -> Result<(), ModelError> {
    let sidecar = checksum_path(path);
    if !sidecar.exists() {
        if required {
            return Err(ModelError::MissingChecksum(sidecar));
        }
        tracing::warn!("No checksum sidecar for {:?}; skipping integrity check", path);
        return Ok(());
    }

    let content = fs::read_to_string(&sidecar).map_err(|source| ModelError::Io {
        path: sidecar.clone(),
        source,
    })?;

    // Accept both a bare digest and `sha256sum` output ("<digest>  <file>").
    let expected = content
        .split_whitespace()
        .next()
        .ok_or_else(|| ModelError::Integrity(format!("{sidecar:?} is empty")))?
        .to_ascii_lowercase();

    let actual = sha256_hex(bytes);
    if expected != actual {
        return Err(ModelError::Integrity(format!(
            "digest mismatch for {path:?}: expected {expected}, got {actual}"
        )));
    }

    tracing::debug!("Model checksum verified");
    Ok(())
}

fn check_feature_names(names: &[String]) -> Result<(), ModelError> {
    if names.len() != FEATURE_COUNT
        || names.iter().zip(FEATURE_NAMES.iter()).any(|(a, b)| a != b)
    {
        return Err(ModelError::Schema(format!(
            "model expects {names:?}, application provides {FEATURE_NAMES:?}"
        )));
    }
    Ok(())
}

/// Reject rows the model cannot evaluate.
fn check_rows(rows: &[FeatureVector], expected: usize) -> Result<(), ClassifierError> {
    for row in rows {
        let values = row.as_slice();
        if values.len() != expected {
            return Err(ClassifierError::Shape {
                expected,
                actual: values.len(),
            });
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::NonFinite(
                FEATURE_NAMES.get(i).copied().unwrap_or("?").to_string(),
            ));
        }
    }
    Ok(())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn default_threshold() -> f64 {
    0.5
}
