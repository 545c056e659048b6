//! Sidebar prediction history.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::PredictionRecord;
use crate::tui::styles::MedicalTheme;

pub const EMPTY_HISTORY_MESSAGE: &str = "No predictions yet. Make your first prediction!";

/// Render `records` (already newest first) as stacked cards.
pub fn render_history(f: &mut Frame, area: Rect, records: &[&PredictionRecord]) {
    let block = Block::default()
        .title(Span::styled(" Prediction History ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let lines: Vec<Line> = if records.is_empty() {
        vec![Line::from(Span::styled(
            EMPTY_HISTORY_MESSAGE,
            MedicalTheme::text_muted(),
        ))]
    } else {
        records.iter().flat_map(|record| history_card(record)).collect()
    };

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(content, area);
}

fn history_card(record: &PredictionRecord) -> [Line<'static>; 4] {
    let card = MedicalTheme::history_card();
    [
        Line::from(Span::styled(record.patient_name().to_string(), card.patch(MedicalTheme::title()))),
        Line::from(vec![
            Span::styled(record.label().to_string(), card.patch(MedicalTheme::label(record.label()))),
            Span::styled(format!(" | {}", record.confidence_text()), card),
        ]),
        Line::from(Span::styled(record.timestamp_text(), card.patch(MedicalTheme::text_muted()))),
        Line::from(""),
    ]
}
