//! UI module: View components for the TUI.

pub mod form;
pub mod history;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Title bar naming the loaded model and whether it reports confidence.
pub fn render_header(f: &mut Frame, area: Rect, model_name: &str, probabilities: bool) {
    let capability = if probabilities {
        "with confidence"
    } else {
        "labels only"
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Diabetes Predictor", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("AI-Powered Diabetes Risk Estimation", MedicalTheme::text_secondary()),
        Span::styled(format!(" │ {model_name}"), MedicalTheme::text_muted()),
        Span::styled(format!(" │ {capability}"), MedicalTheme::text_muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Usage instructions, shown when help is toggled on.
pub fn render_help(f: &mut Frame, area: Rect) {
    let steps = [
        "1. Enter the patient name in the sidebar.",
        "2. Fill all health details in the main form.",
        "3. Press Enter to predict diabetes risk.",
        "4. The latest result appears under the form; past results appear in the sidebar history.",
    ];

    let p = Paragraph::new(
        steps
            .iter()
            .map(|s| Line::from(Span::styled(*s, MedicalTheme::text())))
            .collect::<Vec<_>>(),
    )
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(" How to use ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(p, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
        MedicalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
