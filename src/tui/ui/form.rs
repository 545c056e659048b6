//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{PatientFeatures, FEATURE_COUNT, FEATURE_RANGES};
use crate::tui::styles::MedicalTheme;

/// How a field accepts and parses input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number
    Integer,
    /// Decimal number
    Decimal,
    /// 0 = No, 1 = Yes
    Flag,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub min: f64,
    pub max: f64,
}

impl FormField {
    fn new(label: &'static str, hint: &'static str, kind: FieldKind, index: usize, default: f64) -> Self {
        let (min, max) = FEATURE_RANGES[index];
        let value = match kind {
            FieldKind::Decimal => format!("{default:.1}"),
            FieldKind::Integer | FieldKind::Flag => format!("{default}"),
        };
        Self {
            label,
            hint,
            kind,
            value,
            min,
            max,
        }
    }

    fn display_value(&self) -> String {
        match (self.kind, self.value.as_str()) {
            (FieldKind::Flag, "0") => "0 - No".to_string(),
            (FieldKind::Flag, "1") => "1 - Yes".to_string(),
            _ => self.value.clone(),
        }
    }

    fn parse(&self) -> Result<f64, String> {
        let value: f64 = self
            .value
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", self.label))?;

        if self.kind == FieldKind::Integer && value.fract() != 0.0 {
            return Err(format!("{}: Must be a whole number", self.label));
        }
        if !(self.min..=self.max).contains(&value) {
            return Err(format!(
                "{}: Value must be between {} and {}",
                self.label, self.min, self.max
            ));
        }
        Ok(value)
    }
}

/// Which input has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    PatientName,
    Field(usize),
}

/// Patient form state: the sidebar name input plus the seven feature fields.
pub struct PatientFormState {
    pub patient_name: String,
    pub fields: Vec<FormField>,
    pub focus: Focus,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let defaults = PatientFeatures::default().to_vector();
        let d = |i: usize| defaults.get(i).unwrap_or(0.0);

        Self {
            patient_name: String::new(),
            fields: vec![
                FormField::new("Age", "years (0-120)", FieldKind::Integer, 0, d(0)),
                FormField::new("Hypertension", "0=No, 1=Yes", FieldKind::Flag, 1, d(1)),
                FormField::new("Heart Disease", "0=No, 1=Yes", FieldKind::Flag, 2, d(2)),
                FormField::new("BMI", "kg/m² (0-100)", FieldKind::Decimal, 3, d(3)),
                FormField::new("HbA1c Level", "% (0-20)", FieldKind::Decimal, 4, d(4)),
                FormField::new("Blood Glucose", "mg/dL (0-500)", FieldKind::Decimal, 5, d(5)),
                FormField::new("Former Smoker", "0=No, 1=Yes", FieldKind::Flag, 6, d(6)),
            ],
            focus: Focus::PatientName,
        }
    }
}

impl PatientFormState {
    /// Move focus forward: name, then each field, then back to name.
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Focus::PatientName => Focus::Field(0),
            Focus::Field(i) if i + 1 < self.fields.len() => Focus::Field(i + 1),
            Focus::Field(_) => Focus::PatientName,
        };
    }

    /// Move focus backward.
    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            Focus::PatientName => Focus::Field(self.fields.len() - 1),
            Focus::Field(0) => Focus::PatientName,
            Focus::Field(i) => Focus::Field(i - 1),
        };
    }

    fn focused_field(&mut self) -> Option<&mut FormField> {
        match self.focus {
            Focus::PatientName => None,
            Focus::Field(i) => self.fields.get_mut(i),
        }
    }

    /// Type a character into the focused input.
    pub fn input_char(&mut self, c: char) {
        match self.focused_field() {
            None => {
                if !c.is_control() {
                    self.patient_name.push(c);
                }
            }
            Some(field) => match field.kind {
                FieldKind::Flag => {
                    if c == '0' || c == '1' {
                        field.value = c.to_string();
                    }
                }
                FieldKind::Integer => {
                    if c.is_ascii_digit() {
                        field.value.push(c);
                    }
                }
                FieldKind::Decimal => {
                    if c.is_ascii_digit() || (c == '.' && !field.value.contains('.')) {
                        field.value.push(c);
                    }
                }
            },
        }
    }

    /// Flip a 0/1 field. No effect on other inputs.
    pub fn toggle_flag(&mut self) {
        if let Some(field) = self.focused_field() {
            if field.kind == FieldKind::Flag {
                field.value = if field.value == "1" { "0" } else { "1" }.to_string();
            }
        }
    }

    /// Delete the last character of the focused input.
    pub fn delete_char(&mut self) {
        match self.focused_field() {
            None => {
                self.patient_name.pop();
            }
            Some(field) => {
                field.value.pop();
            }
        }
    }

    /// Clear the focused input.
    pub fn clear_field(&mut self) {
        match self.focused_field() {
            None => self.patient_name.clear(),
            Some(field) => field.value.clear(),
        }
    }

    /// Parse and range-check all fields.
    ///
    /// # Errors
    /// Returns the first field error, naming the field and its allowed range.
    pub fn to_patient_features(&self) -> Result<PatientFeatures, String> {
        let values = self
            .fields
            .iter()
            .map(FormField::parse)
            .collect::<Result<Vec<f64>, String>>()?;
        debug_assert_eq!(values.len(), FEATURE_COUNT);

        let features = PatientFeatures::from_values(&values)?;
        features.validate().map_err(|errors| errors.join(", "))?;
        Ok(features)
    }
}

/// Render the sidebar patient name input.
pub fn render_name_input(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let focused = state.focus == Focus::PatientName;
    let block = Block::default()
        .title(Span::styled(" Patient Name ", title_style(focused)))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let content = Paragraph::new(input_line(
        &state.patient_name,
        "Enter patient name",
        focused,
    ))
    .block(block);

    f.render_widget(content, area);
}

/// Render the seven feature fields in two columns.
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let block = Block::default()
        .title(Span::styled(" Enter Patient Details ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    // Four fields left, three right.
    let mid = 4.min(state.fields.len());
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.focus);
    render_field_column(f, columns[1], &state.fields[mid..], mid, state.focus);
}

fn render_field_column(f: &mut Frame, area: Rect, fields: &[FormField], offset: usize, focus: Focus) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let focused = focus == Focus::Field(offset + i);
        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style(focused)))
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        let content = Paragraph::new(input_line(&field.display_value(), field.hint, focused)).block(block);
        f.render_widget(content, chunks[i]);
    }
}

fn input_line<'a>(value: &str, hint: &'a str, focused: bool) -> Line<'a> {
    let value = if value.is_empty() {
        Span::styled(hint, MedicalTheme::text_muted())
    } else {
        Span::styled(value.to_string(), MedicalTheme::text())
    };

    Line::from(vec![
        Span::raw(" "),
        value,
        if focused {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ])
}

fn title_style(focused: bool) -> ratatui::style::Style {
    if focused {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text_secondary()
    }
}

fn border_style(focused: bool) -> ratatui::style::Style {
    if focused {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus_field(state: &mut PatientFormState, index: usize) {
        state.focus = Focus::Field(index);
    }

    #[test]
    fn test_defaults_parse_to_default_features() {
        let state = PatientFormState::default();
        assert_eq!(state.fields[3].value, "25.0");
        assert_eq!(
            state.to_patient_features().expect("Defaults are valid"),
            PatientFeatures::default()
        );
    }

    #[test]
    fn test_focus_cycles_through_name_and_fields() {
        let mut state = PatientFormState::default();
        for _ in 0..state.fields.len() {
            state.next_field();
        }
        assert_eq!(state.focus, Focus::Field(6));
        state.next_field();
        assert_eq!(state.focus, Focus::PatientName);
        state.prev_field();
        assert_eq!(state.focus, Focus::Field(6));
    }

    #[test]
    fn test_name_accepts_any_printable_text() {
        let mut state = PatientFormState::default();
        for c in "Zoë O'Neil".chars() {
            state.input_char(c);
        }
        state.input_char('\u{7}');
        assert_eq!(state.patient_name, "Zoë O'Neil");

        state.delete_char();
        assert_eq!(state.patient_name, "Zoë O'Nei");
    }

    #[test]
    fn test_flag_fields_only_take_zero_or_one() {
        let mut state = PatientFormState::default();
        focus_field(&mut state, 1);

        state.input_char('7');
        assert_eq!(state.fields[1].value, "0");
        state.input_char('1');
        assert_eq!(state.fields[1].value, "1");
        state.toggle_flag();
        assert_eq!(state.fields[1].value, "0");
        assert_eq!(state.fields[1].display_value(), "0 - No");
    }

    #[test]
    fn test_decimal_field_input() {
        let mut state = PatientFormState::default();
        focus_field(&mut state, 3);
        state.clear_field();
        for c in "31.2.5x".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[3].value, "31.25");
    }

    #[test]
    fn test_out_of_range_names_the_field() {
        let mut state = PatientFormState::default();
        state.fields[5].value = "650".to_string();
        let err = state.to_patient_features().expect_err("Should be rejected");
        assert_eq!(err, "Blood Glucose: Value must be between 0 and 500");

        state.fields[5].value = String::new();
        let err = state.to_patient_features().expect_err("Should be rejected");
        assert_eq!(err, "Blood Glucose: Invalid number");
    }

    #[test]
    fn test_values_pass_through_unmodified() {
        let mut state = PatientFormState::default();
        let values = ["45", "1", "0", "31.2", "6.8", "180", "0"];
        for (field, value) in state.fields.iter_mut().zip(values) {
            field.value = value.to_string();
        }

        let features = state.to_patient_features().expect("Should parse");
        assert_eq!(features.age, 45);
        assert!(features.hypertension);
        assert!((features.bmi - 31.2).abs() < f64::EPSILON);
        assert!((features.blood_glucose_level - 180.0).abs() < f64::EPSILON);
    }
}
