//! Screen layout definitions for the TUI
//!
//! Every screen is a header, a body, and a one-row key hint footer. The
//! flight search body splits further into the form and the results list.

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows taken by the bordered header (top border + title + bottom border)
pub const HEADER_HEIGHT: u16 = 3;

/// Rows taken by the search form: destination, date, adults, cabin, each
/// inside a 3-row bordered input, laid out two per row
pub const FORM_HEIGHT: u16 = 6;

/// Maximum suggestion rows shown in the dropdown
pub const MAX_SUGGESTIONS: u16 = 6;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, origin and screen name
    pub header: Rect,

    /// Screen content
    pub body: Rect,

    /// Key hints
    pub footer: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Areas inside the flight search body
#[derive(Debug, Clone, Copy)]
pub struct FormAreas {
    pub destination: Rect,
    pub date: Rect,
    pub adults: Rect,
    pub cabin: Rect,
    /// Itinerary list below the form
    pub results: Rect,
}

/// Split the flight search body into the form grid and the results list
pub fn create_form(body: Rect) -> FormAreas {
    let [form, results] =
        Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)]).areas(body);
    let [top, bottom] =
        Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(form);
    let [destination, date] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(top);
    let [adults, cabin] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    FormAreas {
        destination,
        date,
        adults,
        cabin,
        results,
    }
}

/// Dropdown area directly below the destination input, clipped to `bounds`
pub fn suggestions_area(input: Rect, count: usize, bounds: Rect) -> Rect {
    let rows = (count as u16).min(MAX_SUGGESTIONS);
    let y = input.y + input.height;
    let available = (bounds.y + bounds.height).saturating_sub(y);
    // Two rows for the border
    let height = (rows + 2).min(available);
    Rect::new(input.x, y, input.width, height)
}

/// Toast area anchored to the top-right corner of `area`
pub fn toast_area(area: Rect, message_width: u16) -> Rect {
    let width = (message_width + 4).min(area.width);
    let height = 3.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width),
        area.y,
        width,
        height,
    )
}
