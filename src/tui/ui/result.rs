//! Current prediction card.

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::PredictionRecord;
use crate::tui::styles::MedicalTheme;

/// Render the latest prediction, or a placeholder when none is set.
pub fn render_result(f: &mut Frame, area: Rect, current: Option<&PredictionRecord>) {
    match current {
        Some(record) => render_record(f, area, record),
        None => render_placeholder(f, area),
    }
}

fn render_record(f: &mut Frame, area: Rect, record: &PredictionRecord) {
    let label_style = MedicalTheme::label(record.label());

    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name}: "), MedicalTheme::text_secondary()),
            Span::styled(value, MedicalTheme::text()),
        ])
    };

    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            record.label().headline(),
            label_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Patient", record.patient_name().to_string()),
        field("Result", record.label().to_string()),
        field("Model Confidence", record.confidence_text()),
        field("Age", record.features().age.to_string()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Prediction ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(label_style),
    );

    f.render_widget(content, area);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter patient details and press Enter to predict diabetes risk",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" Prediction ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}
