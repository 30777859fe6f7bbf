//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Rgb(18, 21, 28); // Itinerary cards
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43); // Suggestion dropdown, toast

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray; // Inactive borders
pub const BORDER_ACTIVE: Color = Color::Cyan; // Focused borders

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black; // Text drawn on ACCENT

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // Prices, direct flights
pub const STATUS_RED: Color = Color::Red; // Errors
pub const STATUS_YELLOW: Color = Color::Yellow; // Warnings, key hints
pub const STATUS_BLUE: Color = Color::Blue; // Info

// --- Itinerary tags ---
pub const TAG_FG: Color = Color::Black;
pub const TAG_BG: Color = Color::Magenta;
