//! Predictor gateway: Thin adapter over the loaded classifier.
//!
//! Turns the model's two raw capabilities (label prediction and optional
//! probability estimation) into one `ClassificationResult` per patient.

use std::path::Path;

use crate::adapters::model::{load_model, ModelArtifact};
use crate::domain::{ClassificationResult, Confidence, FeatureVector, Label};
use crate::ports::{Classifier, ClassifierError};
use crate::PredictorError;

/// Read-only wrapper around a loaded model.
///
/// Holds no mutable state, so one gateway can be shared (`Arc`) by every
/// session in the process.
#[derive(Debug)]
pub struct PredictorGateway<C: Classifier> {
    model: C,
}

impl PredictorGateway<ModelArtifact> {
    /// Load the model artifact at `path`.
    ///
    /// # Errors
    /// Returns `PredictorError::ModelUnavailable` if the artifact cannot be
    /// read, verified or parsed. No prediction is possible in that case.
    pub fn load(path: &Path, require_checksum: bool) -> Result<Self, PredictorError> {
        let model = load_model(path, require_checksum)?;
        Ok(Self::new(model))
    }
}

impl<C: Classifier> PredictorGateway<C> {
    pub fn new(model: C) -> Self {
        Self { model }
    }

    /// Whether results carry a confidence value.
    #[must_use]
    pub fn supports_probabilities(&self) -> bool {
        self.model.probability_estimator().is_some()
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classify one patient.
    ///
    /// Confidence is the maximum class probability when the model can
    /// estimate probabilities, and `None` otherwise.
    ///
    /// # Errors
    /// Returns `PredictorError::Inference` if the model rejects the input or
    /// returns an unusable answer.
    pub fn classify(&self, features: &FeatureVector) -> Result<ClassificationResult, PredictorError> {
        let rows = std::slice::from_ref(features);

        let class = self
            .model
            .predict(rows)?
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::Evaluation("model returned no label".to_string()))?;
        if class > 1 {
            tracing::warn!("Model returned non-binary class {}; treating as negative", class);
        }

        let confidence = match self.model.probability_estimator() {
            Some(estimator) => {
                let probabilities = estimator.predict_proba(rows)?;
                let row = probabilities.first().ok_or_else(|| {
                    ClassifierError::Evaluation("model returned no probabilities".to_string())
                })?;
                let confidence = Confidence::from_class_probabilities(row).ok_or_else(|| {
                    ClassifierError::Evaluation(format!("invalid class probabilities {row:?}"))
                })?;
                Some(confidence)
            }
            None => None,
        };

        Ok(ClassificationResult {
            label: Label::from_class(class),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientFeatures;
    use crate::ports::ProbabilityEstimator;

    /// Scripted model returning fixed answers.
    struct Fixed {
        labels: Vec<u8>,
        proba: Option<Vec<Vec<f64>>>,
    }

    impl Classifier for Fixed {
        fn predict(&self, _rows: &[FeatureVector]) -> Result<Vec<u8>, ClassifierError> {
            Ok(self.labels.clone())
        }

        fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
            self.proba.as_ref().map(|_| self as &dyn ProbabilityEstimator)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    impl ProbabilityEstimator for Fixed {
        fn predict_proba(&self, _rows: &[FeatureVector]) -> Result<Vec<Vec<f64>>, ClassifierError> {
            Ok(self.proba.clone().unwrap_or_default())
        }
    }

    fn features() -> FeatureVector {
        PatientFeatures::default().to_vector()
    }

    #[test]
    fn test_label_and_max_probability() {
        let gateway = PredictorGateway::new(Fixed {
            labels: vec![1],
            proba: Some(vec![vec![0.13, 0.87]]),
        });
        let result = gateway.classify(&features()).expect("Should classify");

        assert_eq!(result.label, Label::Diabetic);
        assert_eq!(result.confidence_text(), "87.0%");
        assert!(gateway.supports_probabilities());
    }

    #[test]
    fn test_confidence_absent_without_capability() {
        let gateway = PredictorGateway::new(Fixed {
            labels: vec![0],
            proba: None,
        });
        let result = gateway.classify(&features()).expect("Should classify");

        assert_eq!(result.label, Label::NonDiabetic);
        assert!(result.confidence.is_none());
        assert_eq!(result.confidence_text(), "N/A");
        assert!(!gateway.supports_probabilities());
    }

    #[test]
    fn test_empty_answers_are_inference_errors() {
        let no_label = PredictorGateway::new(Fixed {
            labels: vec![],
            proba: None,
        });
        assert!(matches!(
            no_label.classify(&features()),
            Err(PredictorError::Inference(_))
        ));

        let bad_proba = PredictorGateway::new(Fixed {
            labels: vec![1],
            proba: Some(vec![vec![1.7, -0.7]]),
        });
        assert!(matches!(
            bad_proba.classify(&features()),
            Err(PredictorError::Inference(_))
        ));
    }

    #[test]
    fn test_load_missing_artifact_is_model_unavailable() {
        let result = PredictorGateway::load(Path::new("does/not/exist.json"), false);
        assert!(matches!(result, Err(PredictorError::ModelUnavailable(_))));
    }
}
