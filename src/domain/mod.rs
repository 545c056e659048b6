//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. Features are a fixed schema, records are
//! immutable once created, and the history only grows until cleared.

mod history;
mod patient;
mod prediction;

pub use history::{HistoryStore, DEFAULT_RECENT_LIMIT};
pub use patient::{FeatureVector, PatientFeatures, FEATURE_COUNT, FEATURE_NAMES, FEATURE_RANGES};
pub use prediction::{
    ClassificationResult, Confidence, Label, PredictionRecord, CONFIDENCE_UNAVAILABLE,
};
