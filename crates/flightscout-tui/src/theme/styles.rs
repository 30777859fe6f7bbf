//! Semantic style builders.

use flightscout_core::Severity;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn price() -> Style {
    Style::default()
        .fg(palette::STATUS_GREEN)
        .add_modifier(Modifier::BOLD)
}

pub fn tag() -> Style {
    Style::default().fg(palette::TAG_FG).bg(palette::TAG_BG)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for the highlighted row in lists
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn popup_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Severity mapping ---

/// Toast indicator for a notification.
///
/// Returns `(icon_char, label, Style)` for the given severity.
pub fn severity_indicator(severity: Severity) -> (&'static str, &'static str, Style) {
    match severity {
        Severity::Error => (
            "✗",
            "Error",
            Style::default()
                .fg(palette::STATUS_RED)
                .add_modifier(Modifier::BOLD),
        ),
        Severity::Warning => (
            "!",
            "Warning",
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        Severity::Info => ("i", "Info", Style::default().fg(palette::STATUS_BLUE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_border_styles_have_correct_colors() {
        assert_eq!(border_inactive().fg, Some(palette::BORDER_DIM));
        assert_eq!(border_active().fg, Some(palette::BORDER_ACTIVE));
    }

    #[test]
    fn test_focused_selected_uses_black_on_cyan() {
        let style = focused_selected();
        assert_eq!(style.fg, Some(palette::CONTRAST_FG));
        assert_eq!(style.bg, Some(palette::ACCENT));
    }

    #[test]
    fn test_severity_indicator_colors() {
        assert_eq!(
            severity_indicator(Severity::Error).2.fg,
            Some(palette::STATUS_RED)
        );
        assert_eq!(
            severity_indicator(Severity::Warning).2.fg,
            Some(palette::STATUS_YELLOW)
        );
        assert_eq!(
            severity_indicator(Severity::Info).2.fg,
            Some(palette::STATUS_BLUE)
        );
    }

    #[test]
    fn test_severity_indicator_labels() {
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            let (icon, label, _style) = severity_indicator(severity);
            assert!(!icon.is_empty());
            assert!(!label.is_empty());
        }
    }
}
