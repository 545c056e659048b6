//! Classifier port: Trait for the pre-trained model.
//!
//! Abstracts the concrete artifact format from the application logic. Only
//! the two capabilities the application consumes are modelled: hard label
//! prediction, and an optional per-class probability estimate.

use crate::domain::FeatureVector;

/// Errors raised by a model while evaluating input rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature shape mismatch: expected {expected} values, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("Non-finite value for feature {0}")]
    NonFinite(String),

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),
}

/// A loaded binary classifier.
///
/// Implementations must be immutable after load: the same instance is shared
/// read-only by every session.
pub trait Classifier: Send + Sync {
    /// Predict the class (0 or 1) of every row.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model rejects a row.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<u8>, ClassifierError>;

    /// Probability capability, when the model supports it.
    ///
    /// Models that only ever emit hard labels return `None`.
    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        None
    }

    /// Short human-readable description of the model.
    fn name(&self) -> &str;
}

/// Optional capability: per-class probabilities.
pub trait ProbabilityEstimator: Send + Sync {
    /// One probability row per input row, indexed by class.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model rejects a row.
    fn predict_proba(&self, rows: &[FeatureVector]) -> Result<Vec<Vec<f64>>, ClassifierError>;
}
