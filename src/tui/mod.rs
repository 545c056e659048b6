//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the single-screen predictor:
//! - Patient name input and prediction history in the sidebar
//! - Health details form
//! - Latest prediction card

mod app;
mod styles;
mod ui;

pub use app::{App, StatusMessage};
pub use styles::MedicalTheme;
