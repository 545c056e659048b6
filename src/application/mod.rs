//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the classifier port to
//! implement the predict-and-record workflow of one session.

mod gateway;
mod session;
mod workflow;

pub use gateway::PredictorGateway;
pub use session::Session;
pub use workflow::{PredictionWorkflow, MISSING_NAME_MESSAGE};
