//! Prediction workflow: submit and clear commands for one session.
//!
//! Coordinates:
//! - Patient name presence check
//! - Feature vector construction
//! - Classification through the shared gateway
//! - Record assembly and history update

use std::sync::Arc;

use crate::application::{PredictorGateway, Session};
use crate::domain::{PatientFeatures, PredictionRecord};
use crate::ports::Classifier;
use crate::PredictorError;

/// Message shown when a prediction is requested without a patient name.
pub const MISSING_NAME_MESSAGE: &str = "Please enter the patient name before predicting.";

/// Command handlers for one interactive session.
///
/// The gateway is shared with other sessions; the [`Session`] is owned
/// exclusively by this workflow.
pub struct PredictionWorkflow<C: Classifier> {
    gateway: Arc<PredictorGateway<C>>,
    session: Session,
}

impl<C: Classifier> PredictionWorkflow<C> {
    /// Start a new session against `gateway`.
    pub fn new(gateway: Arc<PredictorGateway<C>>) -> Self {
        Self {
            gateway,
            session: Session::new(),
        }
    }

    /// Classify a patient and record the result.
    ///
    /// On success the new record is appended to the history and becomes the
    /// current prediction. On any error the session is left untouched.
    ///
    /// # Errors
    /// - `PredictorError::Validation` if `patient_name` is empty after trimming
    /// - `PredictorError::Inference` if the model rejects the features
    pub fn submit(
        &mut self,
        patient_name: &str,
        features: PatientFeatures,
    ) -> Result<PredictionRecord, PredictorError> {
        let name = patient_name.trim();
        if name.is_empty() {
            tracing::warn!("Rejected prediction request without a patient name");
            return Err(PredictorError::Validation(MISSING_NAME_MESSAGE.to_string()));
        }

        tracing::debug!("Classifying patient features");
        let result = self.gateway.classify(&features.to_vector()).map_err(|e| {
            tracing::error!("Prediction failed: {}", e);
            e
        })?;

        let record = PredictionRecord::new(name, features, result);
        self.session.record(record.clone());

        tracing::info!(
            "Prediction recorded: id={}, label={}, confidence={}, history size={}",
            record.id(),
            record.label(),
            record.confidence_text(),
            self.session.history().len()
        );

        Ok(record)
    }

    /// Empty the history and unset the current prediction.
    pub fn clear(&mut self) {
        let dropped = self.session.history().len();
        self.session.clear();
        tracing::info!("History cleared ({} records dropped)", dropped);
    }

    /// The most recent successful prediction, if any since the last clear.
    #[must_use]
    pub fn current(&self) -> Option<&PredictionRecord> {
        self.session.current()
    }

    /// The last `n` records, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&PredictionRecord> {
        self.session.recent(n)
    }

    #[must_use]
    pub fn gateway(&self) -> &PredictorGateway<C> {
        &self.gateway
    }
}
