//! Prediction result types.
//!
//! Represents the output of the diabetes classifier and the immutable record
//! kept in the session history.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patient::PatientFeatures;

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Diabetic,
    #[serde(rename = "Non-Diabetic")]
    NonDiabetic,
}

impl Label {
    /// Map a raw model class to a label. Class 1 is the positive class.
    #[must_use]
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Self::Diabetic
        } else {
            Self::NonDiabetic
        }
    }

    /// Headline shown on the result card.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Diabetic => "DIABETIC",
            Self::NonDiabetic => "NON-DIABETIC",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diabetic => write!(f, "Diabetic"),
            Self::NonDiabetic => write!(f, "Non-Diabetic"),
        }
    }
}

/// Maximum class probability reported by the model (0.0 to 1.0).
///
/// Displays as a percentage with one decimal, e.g. `87.3%`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence value, or `None` if `probability` is not in [0, 1].
    #[must_use]
    pub fn new(probability: f64) -> Option<Self> {
        (0.0..=1.0).contains(&probability).then_some(Self(probability))
    }

    /// Confidence from a per-class probability row: its maximum entry.
    #[must_use]
    pub fn from_class_probabilities(probabilities: &[f64]) -> Option<Self> {
        probabilities
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .fold(None, |best: Option<f64>, p| {
                Some(best.map_or(p, |b| b.max(p)))
            })
            .and_then(Self::new)
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Placeholder shown when the model has no probability capability.
pub const CONFIDENCE_UNAVAILABLE: &str = "N/A";

/// Result of one classifier call, before it becomes a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,

    /// `None` when the model exposes no probability estimate
    pub confidence: Option<Confidence>,
}

impl ClassificationResult {
    /// Confidence as display text, `N/A` when unavailable.
    #[must_use]
    pub fn confidence_text(&self) -> String {
        confidence_text(self.confidence)
    }
}

fn confidence_text(confidence: Option<Confidence>) -> String {
    confidence.map_or_else(|| CONFIDENCE_UNAVAILABLE.to_string(), |c| c.to_string())
}

/// One completed prediction.
///
/// Fields are private and set once in [`PredictionRecord::new`]; records are
/// never modified after they enter the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    id: Uuid,
    patient_name: String,
    features: PatientFeatures,
    label: Label,
    confidence: Option<Confidence>,
    created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Assemble a record, stamping it with the current time.
    ///
    /// The caller is responsible for passing an already trimmed, non-empty
    /// name.
    #[must_use]
    pub fn new(
        patient_name: impl Into<String>,
        features: PatientFeatures,
        result: ClassificationResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_name: patient_name.into(),
            features,
            label: result.label,
            confidence: result.confidence,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    #[must_use]
    pub fn features(&self) -> &PatientFeatures {
        &self.features
    }

    #[must_use]
    pub fn label(&self) -> Label {
        self.label
    }

    #[must_use]
    pub fn confidence(&self) -> Option<Confidence> {
        self.confidence
    }

    /// Confidence as display text, `N/A` when unavailable.
    #[must_use]
    pub fn confidence_text(&self) -> String {
        confidence_text(self.confidence)
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creation time in local time, minute precision (`2024-05-01 14:03`).
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}
