//! Main TUI application state machine.
//!
//! Handles:
//! - Focus and input event handling
//! - Submit and clear-history commands against the workflow
//! - Frame layout

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::adapters::ModelArtifact;
use crate::application::{PredictionWorkflow, PredictorGateway, MISSING_NAME_MESSAGE};
use crate::config::AppConfig;
use crate::ports::Classifier;
use crate::PredictorError;

use super::styles::MedicalTheme;
use super::ui::{
    form::{render_name_input, render_patient_form, FieldKind, Focus, PatientFormState},
    history::render_history,
    render_disclaimer, render_header, render_help,
    result::render_result,
};

/// Feedback line under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Main application state
pub struct App<C: Classifier = ModelArtifact> {
    /// Predict-and-record commands for this session
    workflow: PredictionWorkflow<C>,

    /// Form inputs
    form: PatientFormState,

    /// Feedback for the last action
    status: Option<StatusMessage>,

    /// Records shown in the history panel
    history_limit: usize,

    show_help: bool,
    should_quit: bool,
}

impl App<ModelArtifact> {
    /// Create the application from configuration.
    ///
    /// Loads the model artifact; the application refuses to start without it.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let gateway = PredictorGateway::load(&config.model_path, config.require_checksum)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {}", config.model_path, e))?;

        Ok(Self::with_gateway(Arc::new(gateway), config.history_limit))
    }
}

impl<C: Classifier> App<C> {
    /// Create application with an injected gateway.
    pub fn with_gateway(gateway: Arc<PredictorGateway<C>>, history_limit: usize) -> Self {
        Self {
            workflow: PredictionWorkflow::new(gateway),
            form: PatientFormState::default(),
            status: None,
            history_limit,
            show_help: false,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn workflow(&self) -> &PredictionWorkflow<C> {
        &self.workflow
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Windows reports releases too.
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole screen.
    pub fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[0]);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Patient name
                Constraint::Min(0),    // History
            ])
            .split(columns[0]);

        render_name_input(f, sidebar[0], &self.form);
        render_history(f, sidebar[1], &self.workflow.recent(self.history_limit));

        let help_height = if self.show_help { 6 } else { 0 };
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),           // Header
                Constraint::Length(14),          // Form
                Constraint::Length(2),           // Status / key hints
                Constraint::Min(8),              // Result card
                Constraint::Length(help_height), // Help
            ])
            .split(columns[1]);

        let gateway = self.workflow.gateway();
        render_header(f, main[0], gateway.model_name(), gateway.supports_probabilities());
        render_patient_form(f, main[1], &self.form);
        self.render_status(f, main[2]);
        render_result(f, main[3], self.workflow.current());
        if self.show_help {
            render_help(f, main[4]);
        }

        render_disclaimer(f, rows[1]);
    }

    fn render_status(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let content = match &self.status {
            Some(StatusMessage::Error(message)) => Line::from(vec![
                Span::styled("! ", MedicalTheme::danger()),
                Span::styled(message.clone(), MedicalTheme::danger()),
            ]),
            Some(StatusMessage::Info(message)) => {
                Line::from(Span::styled(message.clone(), MedicalTheme::text_secondary()))
            }
            None => Line::from(vec![
                Span::styled("[Tab/↑↓] ", MedicalTheme::key_hint()),
                Span::styled("Navigate ", MedicalTheme::key_desc()),
                Span::styled("[Space] ", MedicalTheme::key_hint()),
                Span::styled("Toggle 0/1 ", MedicalTheme::key_desc()),
                Span::styled("[Enter] ", MedicalTheme::key_hint()),
                Span::styled("Predict ", MedicalTheme::key_desc()),
                Span::styled("[Ctrl+X] ", MedicalTheme::key_hint()),
                Span::styled("Clear History ", MedicalTheme::key_desc()),
                Span::styled("[F1] ", MedicalTheme::key_hint()),
                Span::styled("Help ", MedicalTheme::key_desc()),
                Span::styled("[Esc] ", MedicalTheme::key_hint()),
                Span::styled("Quit", MedicalTheme::key_desc()),
            ]),
        };

        let status = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(MedicalTheme::border()),
        );

        f.render_widget(status, area);
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('x') => self.clear_history(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.show_help = !self.show_help,
            KeyCode::Enter => self.submit(),
            KeyCode::Down | KeyCode::Tab => self.form.next_field(),
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Left | KeyCode::Right => self.form.toggle_flag(),
            KeyCode::Char(' ') if self.focused_kind() == Some(FieldKind::Flag) => {
                self.form.toggle_flag();
            }
            KeyCode::Char(c) => {
                self.form.input_char(c);
                self.status = None;
            }
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.clear_field(),
            _ => {}
        }
    }

    fn focused_kind(&self) -> Option<FieldKind> {
        match self.form.focus {
            Focus::PatientName => None,
            Focus::Field(i) => self.form.fields.get(i).map(|field| field.kind),
        }
    }

    /// Submit the form to the workflow.
    fn submit(&mut self) {
        if self.form.patient_name.trim().is_empty() {
            self.status = Some(StatusMessage::Error(MISSING_NAME_MESSAGE.to_string()));
            self.form.focus = Focus::PatientName;
            return;
        }

        let features = match self.form.to_patient_features() {
            Ok(features) => features,
            Err(message) => {
                self.status = Some(StatusMessage::Error(message));
                return;
            }
        };

        self.status = match self.workflow.submit(&self.form.patient_name, features) {
            Ok(record) => Some(StatusMessage::Info(format!(
                "Prediction complete: {} ({})",
                record.label(),
                record.confidence_text()
            ))),
            Err(PredictorError::Validation(message)) => Some(StatusMessage::Error(message)),
            Err(e) => Some(StatusMessage::Error(format!(
                "Prediction could not be completed: {e}"
            ))),
        };
    }

    fn clear_history(&mut self) {
        self.workflow.clear();
        self.status = Some(StatusMessage::Info("History cleared.".to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureVector, Label};
    use crate::ports::ClassifierError;
    use ratatui::backend::TestBackend;

    /// Diabetic when HbA1c is 6.5% or higher; rejects a glucose of exactly 0.
    struct Hba1cRule;

    impl Classifier for Hba1cRule {
        fn predict(&self, rows: &[FeatureVector]) -> std::result::Result<Vec<u8>, ClassifierError> {
            rows.iter()
                .map(|row| match (row.get(4), row.get(5)) {
                    (_, Some(g)) if g == 0.0 => {
                        Err(ClassifierError::Evaluation("glucose of zero".to_string()))
                    }
                    (Some(h), _) => Ok(u8::from(h >= 6.5)),
                    _ => Err(ClassifierError::Shape { expected: 7, actual: 0 }),
                })
                .collect()
        }

        fn name(&self) -> &str {
            "hba1c rule"
        }
    }

    fn app() -> App<Hba1cRule> {
        App::with_gateway(Arc::new(PredictorGateway::new(Hba1cRule)), 10)
    }

    fn type_text(app: &mut App<Hba1cRule>, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn screen_text(app: &App<Hba1cRule>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).expect("Test terminal");
        terminal.draw(|f| app.draw(f)).expect("Should draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_submit_without_name_is_blocked() {
        let mut app = app();
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(
            app.status(),
            Some(&StatusMessage::Error(MISSING_NAME_MESSAGE.to_string()))
        );
        assert!(app.workflow().current().is_none());
    }

    #[test]
    fn test_submit_records_prediction() {
        let mut app = app();
        type_text(&mut app, "Alice");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        let current = app.workflow().current().expect("Should have a prediction");
        assert_eq!(current.patient_name(), "Alice");
        assert_eq!(current.label(), Label::NonDiabetic);
        assert!(matches!(app.status(), Some(StatusMessage::Info(_))));
    }

    #[test]
    fn test_field_error_blocks_submission() {
        let mut app = app();
        type_text(&mut app, "Bob");
        // Focus the age field and make it empty.
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(
            app.status(),
            Some(&StatusMessage::Error("Age: Invalid number".to_string()))
        );
        assert!(app.workflow().recent(10).is_empty());
    }

    #[test]
    fn test_inference_failure_keeps_history() {
        let mut app = app();
        type_text(&mut app, "Dana");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        // Blood glucose is the sixth field.
        for _ in 0..6 {
            app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        type_text(&mut app, "0");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert!(matches!(app.status(), Some(StatusMessage::Error(_))));
        assert_eq!(app.workflow().recent(10).len(), 1);
    }

    #[test]
    fn test_space_toggles_flags_but_types_in_name() {
        let mut app = app();
        type_text(&mut app, "Ann Lee");
        assert_eq!(app.form.patient_name, "Ann Lee");

        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(app.form.fields[1].value, "1");
    }

    #[test]
    fn test_clear_history_and_quit() {
        let mut app = app();
        type_text(&mut app, "Eve");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('x'), KeyModifiers::CONTROL);

        assert!(app.workflow().current().is_none());
        assert!(app.workflow().recent(10).is_empty());
        assert!(!app.should_quit());

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_shows_history_and_result() {
        let mut app = app();
        let empty = screen_text(&app);
        assert!(empty.contains("Diabetes Predictor"));
        assert!(empty.contains("hba1c rule │ labels only"));
        assert!(empty.contains("No predictions yet"));

        type_text(&mut app, "Frank");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::F(1), KeyModifiers::NONE);

        let screen = screen_text(&app);
        assert!(screen.contains("NON-DIABETIC"));
        assert!(screen.contains("Frank"));
        assert!(screen.contains("N/A"));
        assert!(screen.contains("How to use"));
    }
}
