//! Footer with the key bindings for the current screen

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

/// A single `[key] action` entry. Lower `rank` survives longer when the
/// footer is too narrow; rank 0 is always shown.
struct Hint {
    key: &'static str,
    action: &'static str,
    rank: u8,
}

impl Hint {
    const fn new(key: &'static str, action: &'static str, rank: u8) -> Self {
        Self { key, action, rank }
    }

    /// Columns used by `[key] action` plus the two-space separator
    fn width(&self) -> usize {
        self.key.width() + self.action.width() + 5
    }
}

const AIRPORT_HINTS: &[Hint] = &[
    Hint::new("Enter", "Search / Select", 1),
    Hint::new("Tab", "Switch list", 2),
    Hint::new("↑↓", "Move", 3),
    Hint::new("Esc", "Quit", 0),
];

const FLIGHT_HINTS: &[Hint] = &[
    Hint::new("Enter", "Select", 1),
    Hint::new("Tab", "Field", 2),
    Hint::new("↑↓", "Suggestions", 4),
    Hint::new("+/-", "Adults", 3),
    Hint::new("←→", "Cabin", 5),
    Hint::new("PgUp/PgDn", "Scroll", 6),
    Hint::new("Esc", "Back", 0),
];

/// One-row key hint footer
pub struct KeyHints {
    hints: &'static [Hint],
}

impl KeyHints {
    pub fn airport_selection() -> Self {
        Self {
            hints: AIRPORT_HINTS,
        }
    }

    pub fn flight_search() -> Self {
        Self {
            hints: FLIGHT_HINTS,
        }
    }

    /// Hints that fit in `width` columns, in display order
    fn visible(&self, width: usize) -> Vec<&'static Hint> {
        let mut shown: Vec<&'static Hint> = self.hints.iter().collect();
        let mut used = 1 + shown.iter().map(|h| h.width()).sum::<usize>();
        while used > width {
            let Some((index, hint)) = shown
                .iter()
                .enumerate()
                .filter(|(_, h)| h.rank > 0)
                .max_by_key(|(_, h)| h.rank)
            else {
                break;
            };
            used -= hint.width();
            shown.remove(index);
        }
        shown
    }
}

impl Widget for KeyHints {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(" ")];
        for hint in self.visible(area.width as usize) {
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(hint.key, styles::keybinding()));
            spans.push(Span::styled(format!("] {}  ", hint.action), styles::text_muted()));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
