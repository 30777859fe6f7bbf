//! Terminal-independent key input
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the engine never depends on a terminal library.

/// A key press, as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held (Ctrl+C, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
}

impl InputKey {
    /// Characters accepted by free-text fields
    pub fn text_char(self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}
