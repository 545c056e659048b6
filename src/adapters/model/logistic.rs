//! Logistic regression with an optional standard scaler.

use serde::{Deserialize, Serialize};

use super::{check_rows, default_threshold, sigmoid, ModelError};
use crate::domain::{FeatureVector, FEATURE_COUNT};
use crate::ports::{Classifier, ClassifierError, ProbabilityEstimator};

/// Linear model over (optionally standardized) features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,

    /// Per-feature mean subtracted before weighting
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,

    /// Per-feature scale divided out after centering
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,

    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticRegression {
    pub(super) fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Malformed(format!(
                "expected {} coefficients, got {}",
                FEATURE_COUNT,
                self.coefficients.len()
            )));
        }
        for (name, values) in [("scaler_mean", &self.scaler_mean), ("scaler_scale", &self.scaler_scale)] {
            if let Some(values) = values {
                if values.len() != FEATURE_COUNT {
                    return Err(ModelError::Malformed(format!(
                        "{name} has {} entries, expected {FEATURE_COUNT}",
                        values.len()
                    )));
                }
            }
        }
        if let Some(scale) = &self.scaler_scale {
            if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(ModelError::Malformed(
                    "scaler_scale entries must be finite and non-zero".to_string(),
                ));
            }
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Malformed("non-finite weights".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::Malformed(format!(
                "threshold {} must be in [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Positive-class probability for one row.
    ///
    /// Weight and scaler lengths are checked here too, so a model built by
    /// hand without [`LogisticRegression::validate`] fails instead of panicking.
    fn probability(&self, row: &FeatureVector) -> Result<f64, ClassifierError> {
        let values = row.as_slice();
        let shape = |len: usize| ClassifierError::Shape {
            expected: len,
            actual: values.len(),
        };

        let mut z = self.intercept;
        for (i, x) in values.iter().enumerate() {
            let weight = self.coefficients.get(i).ok_or_else(|| shape(self.coefficients.len()))?;
            let mean = match &self.scaler_mean {
                Some(m) => *m.get(i).ok_or_else(|| shape(m.len()))?,
                None => 0.0,
            };
            let scale = match &self.scaler_scale {
                Some(s) => *s.get(i).ok_or_else(|| shape(s.len()))?,
                None => 1.0,
            };
            z += weight * (x - mean) / scale;
        }

        Ok(sigmoid(z))
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<u8>, ClassifierError> {
        check_rows(rows, FEATURE_COUNT)?;
        rows.iter()
            .map(|row| Ok(u8::from(self.probability(row)? >= self.threshold)))
            .collect()
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self)
    }

    fn name(&self) -> &str {
        "logistic regression"
    }
}

impl ProbabilityEstimator for LogisticRegression {
    fn predict_proba(&self, rows: &[FeatureVector]) -> Result<Vec<Vec<f64>>, ClassifierError> {
        check_rows(rows, FEATURE_COUNT)?;
        rows.iter()
            .map(|row| {
                let p = self.probability(row)?;
                Ok(vec![1.0 - p, p])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression {
            feature_names: Vec::new(),
            // Only blood glucose carries weight.
            coefficients: vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            intercept: 0.0,
            scaler_mean: Some(vec![0.0, 0.0, 0.0, 0.0, 0.0, 140.0, 0.0]),
            scaler_scale: Some(vec![1.0, 1.0, 1.0, 1.0, 1.0, 20.0, 1.0]),
            threshold: 0.5,
        }
    }

    fn row(glucose: f64) -> FeatureVector {
        FeatureVector::from([40.0, 0.0, 0.0, 24.0, 5.4, glucose, 0.0])
    }

    #[test]
    fn test_standardized_probability() {
        let m = model();
        let proba = m
            .predict_proba(&[row(140.0), row(180.0)])
            .expect("Should estimate");
        assert!((proba[0][1] - 0.5).abs() < 1e-12);
        assert!((proba[1][1] - sigmoid(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_decides_label() {
        let mut m = model();
        assert_eq!(m.predict(&[row(120.0), row(160.0)]).expect("Should predict"), vec![0, 1]);

        m.threshold = 0.9;
        assert_eq!(m.predict(&[row(160.0)]).expect("Should predict"), vec![0]);
    }

    #[test]
    fn test_always_estimates_probabilities() {
        assert!(model().probability_estimator().is_some());
    }

    #[test]
    fn test_validation() {
        assert!(model().validate().is_ok());

        let mut short = model();
        short.coefficients.pop();
        assert!(short.validate().is_err());

        let mut zero_scale = model();
        zero_scale.scaler_scale = Some(vec![0.0; FEATURE_COUNT]);
        assert!(zero_scale.validate().is_err());
    }

    #[test]
    fn test_unvalidated_short_weights_are_shape_errors() {
        let mut short = model();
        short.coefficients.truncate(3);
        assert_eq!(
            short.predict(&[row(150.0)]),
            Err(ClassifierError::Shape { expected: 3, actual: FEATURE_COUNT })
        );

        let mut short_scaler = model();
        short_scaler.scaler_mean = Some(vec![0.0; 2]);
        assert_eq!(
            short_scaler.predict_proba(&[row(150.0)]),
            Err(ClassifierError::Shape { expected: 2, actual: FEATURE_COUNT })
        );
    }
}
