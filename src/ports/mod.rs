//! Ports layer: Trait definitions for external operations.
//!
//! The only external system the application depends on is the trained model,
//! so this is the single boundary between the use cases and the adapters.

mod classifier;

pub use classifier::{Classifier, ClassifierError, ProbabilityEstimator};
