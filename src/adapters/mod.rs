//! Adapters layer: Concrete implementations of ports.
//!
//! - `model`: JSON model artifacts implementing `Classifier`
//! - `sanitize`: redaction of patient identifiers in logs

pub mod model;
pub mod sanitize;

pub use model::{load_model, ModelArtifact, ModelError};
