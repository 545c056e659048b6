//! Medical-themed color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Label;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Sky blue - Primary color (header, focus)
    pub const PRIMARY: Color = Color::Rgb(79, 172, 254); // #4FACFE

    /// Cyan highlight for cursors and key hints
    pub const PRIMARY_LIGHT: Color = Color::Rgb(0, 242, 254); // #00F2FE

    /// Indigo accent for the intro card
    pub const ACCENT: Color = Color::Rgb(102, 126, 234); // #667EEA

    /// Light slate for borders
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Emerald - Non-diabetic result
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - Diabetic result
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - Errors
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// History card background
    pub const BG_CARD: Color = Color::Rgb(31, 41, 51); // #1F2933

    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 231, 235); // #E5E7EB
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Background of one history entry
    #[must_use]
    pub fn history_card() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_CARD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Color coding for a prediction label
    #[must_use]
    pub fn label(label: Label) -> Style {
        match label {
            Label::NonDiabetic => Style::default().fg(Self::SUCCESS),
            Label::Diabetic => Style::default().fg(Self::WARNING),
        }
    }
}
