//! Gradient-boosted tree ensemble (XGBoost-style dump).

use serde::{Deserialize, Serialize};

use super::{check_rows, default_threshold, sigmoid, ModelError};
use crate::domain::{FeatureVector, FEATURE_COUNT};
use crate::ports::{Classifier, ClassifierError, ProbabilityEstimator};

/// Learning objective the ensemble was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Margin is a log-odds; probabilities are available.
    #[serde(rename = "binary:logistic")]
    BinaryLogistic,
    /// Margin is a raw score; only hard labels are available.
    #[serde(rename = "binary:hinge")]
    BinaryHinge,
}

/// One node of a regression tree, addressed by index within its tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `yes` when `row[feature] < threshold`, else to `no`.
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Leaf value reached by `row`.
    fn evaluate(&self, row: &[f64]) -> Result<f64, String> {
        let mut index = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                }) => {
                    let value = row
                        .get(*feature)
                        .ok_or_else(|| format!("split on missing feature {feature}"))?;
                    index = if *value < *threshold { *yes } else { *no };
                }
                None => return Err(format!("node index {index} out of range")),
            }
        }
        Err("tree does not reach a leaf".to_string())
    }

    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {i} splits on unknown feature {feature}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    if *yes >= self.nodes.len() || *no >= self.nodes.len() {
                        return Err(format!("node {i} points outside the tree"));
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {i} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Boosted ensemble of regression trees for binary classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    pub feature_names: Vec<String>,
    pub objective: Objective,

    /// Global bias. A probability for `binary:logistic`, a raw margin otherwise.
    #[serde(default = "default_base_score")]
    pub base_score: f64,

    /// Decision threshold on the positive-class probability.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    pub trees: Vec<Tree>,
}

fn default_base_score() -> f64 {
    0.5
}

impl GradientBoostedTrees {
    pub(super) fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Malformed("ensemble has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| ModelError::Malformed(format!("tree {i}: {e}")))?;
        }
        if self.objective == Objective::BinaryLogistic
            && !(self.base_score > 0.0 && self.base_score < 1.0)
        {
            return Err(ModelError::Malformed(format!(
                "base_score {} must be in (0, 1) for binary:logistic",
                self.base_score
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::Malformed(format!(
                "threshold {} must be in [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    fn margin(&self, row: &FeatureVector) -> Result<f64, ClassifierError> {
        let base = match self.objective {
            Objective::BinaryLogistic => (self.base_score / (1.0 - self.base_score)).ln(),
            Objective::BinaryHinge => self.base_score,
        };

        self.trees
            .iter()
            .enumerate()
            .try_fold(base, |acc, (i, tree)| {
                tree.evaluate(row.as_slice())
                    .map(|leaf| acc + leaf)
                    .map_err(|e| ClassifierError::Evaluation(format!("tree {i}: {e}")))
            })
    }
}

impl Classifier for GradientBoostedTrees {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<u8>, ClassifierError> {
        check_rows(rows, FEATURE_COUNT)?;
        rows.iter()
            .map(|row| {
                let margin = self.margin(row)?;
                let positive = match self.objective {
                    Objective::BinaryLogistic => sigmoid(margin) >= self.threshold,
                    Objective::BinaryHinge => margin > 0.0,
                };
                Ok(u8::from(positive))
            })
            .collect()
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        match self.objective {
            Objective::BinaryLogistic => Some(self),
            Objective::BinaryHinge => None,
        }
    }

    fn name(&self) -> &str {
        match self.objective {
            Objective::BinaryLogistic => "gradient-boosted trees (binary:logistic)",
            Objective::BinaryHinge => "gradient-boosted trees (binary:hinge)",
        }
    }
}

impl ProbabilityEstimator for GradientBoostedTrees {
    fn predict_proba(&self, rows: &[FeatureVector]) -> Result<Vec<Vec<f64>>, ClassifierError> {
        check_rows(rows, FEATURE_COUNT)?;
        rows.iter()
            .map(|row| {
                let p = sigmoid(self.margin(row)?);
                Ok(vec![1.0 - p, p])
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(glucose: f64, hba1c: f64) -> FeatureVector {
        FeatureVector::from([50.0, 0.0, 0.0, 27.0, hba1c, glucose, 0.0])
    }

    /// Two stumps: high glucose and high HbA1c each push towards positive.
    fn ensemble(objective: Objective) -> GradientBoostedTrees {
        let stump = |feature: usize, threshold: f64, low: f64, high: f64| Tree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    yes: 1,
                    no: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        };
        GradientBoostedTrees {
            feature_names: Vec::new(),
            objective,
            base_score: if objective == Objective::BinaryLogistic { 0.5 } else { 0.0 },
            threshold: 0.5,
            trees: vec![stump(5, 140.0, -1.5, 1.5), stump(4, 6.5, -1.0, 1.0)],
        }
    }

    #[test]
    fn test_logistic_prediction_and_probabilities() {
        let model = ensemble(Objective::BinaryLogistic);
        let rows = [row(100.0, 5.0), row(200.0, 7.5)];

        assert_eq!(model.predict(&rows).expect("Should predict"), vec![0, 1]);

        let estimator = model.probability_estimator().expect("Has probabilities");
        let proba = estimator.predict_proba(&rows).expect("Should estimate");
        assert!((proba[0][1] - sigmoid(-2.5)).abs() < 1e-12);
        assert!((proba[1][0] + proba[1][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hinge_has_no_probabilities() {
        let model = ensemble(Objective::BinaryHinge);
        assert!(model.probability_estimator().is_none());
        assert_eq!(
            model.predict(&[row(200.0, 5.0), row(100.0, 5.0)]).expect("Should predict"),
            vec![1, 0]
        );
    }

    #[test]
    fn test_split_boundary_goes_to_no_branch() {
        let model = ensemble(Objective::BinaryHinge);
        // glucose == threshold is not "< threshold", so the high leaf is taken.
        let margin = model.margin(&row(140.0, 5.0)).expect("Should evaluate");
        assert!((margin - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cycle_is_an_evaluation_error() {
        let mut model = ensemble(Objective::BinaryLogistic);
        model.trees[0].nodes[0] = TreeNode::Split {
            feature: 5,
            threshold: 140.0,
            yes: 0,
            no: 0,
        };
        assert!(matches!(
            model.predict(&[row(100.0, 5.0)]),
            Err(ClassifierError::Evaluation(_))
        ));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let model = ensemble(Objective::BinaryLogistic);
        let bad = FeatureVector::from([50.0, 0.0, 0.0, f64::NAN, 5.0, 100.0, 0.0]);
        assert_eq!(
            model.predict(&[bad]),
            Err(ClassifierError::NonFinite("bmi".to_string()))
        );
    }

    #[test]
    fn test_validation() {
        assert!(ensemble(Objective::BinaryLogistic).validate().is_ok());

        let mut dangling = ensemble(Objective::BinaryLogistic);
        dangling.trees[1].nodes.truncate(2);
        assert!(matches!(dangling.validate(), Err(ModelError::Malformed(_))));

        let mut bad_base = ensemble(Objective::BinaryLogistic);
        bad_base.base_score = 1.0;
        assert!(bad_base.validate().is_err());

        let mut empty = ensemble(Objective::BinaryHinge);
        empty.trees.clear();
        assert!(empty.validate().is_err());
    }
}
