//! # Diabetes Predictor
//!
//! Interactive diabetes risk classification with a session-scoped history.
//!
//! This crate provides:
//! - A fixed-schema patient feature record and immutable prediction records
//! - A gateway over a pre-trained binary classifier loaded from disk
//! - A predict-and-record workflow owning one session's history
//! - Terminal UI for entering patient data and reviewing recent predictions
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (features, labels, records, history)
//! - `ports`: Trait definitions for the classifier boundary
//! - `adapters`: Concrete implementations (JSON model artifacts, log redaction)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{PredictionWorkflow, PredictorGateway, Session};
pub use domain::{Label, PatientFeatures, PredictionRecord};

/// Result type for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;

/// Main error type for the predictor
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] adapters::ModelError),

    #[error("Prediction failed: {0}")]
    Inference(#[from] ports::ClassifierError),
}
