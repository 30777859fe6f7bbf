//! Flight results: one card per itinerary

use chrono::NaiveDateTime;
use flightscout_app::state::SearchPhase;
use flightscout_core::{Itinerary, Leg, Place};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons, palette, styles};

pub const SEARCHING_TEXT: &str = "Searching flights...";
pub const NO_FLIGHTS_TEXT: &str = "No flights found.";
pub const IDLE_TEXT: &str = "Pick a destination and press Enter to search.";

/// Results area below the search form
pub struct ItineraryList<'a> {
    phase: &'a SearchPhase,
    scroll: usize,
    animation_frame: u64,
}

impl<'a> ItineraryList<'a> {
    pub fn new(phase: &'a SearchPhase) -> Self {
        Self {
            phase,
            scroll: 0,
            animation_frame: 0,
        }
    }

    /// Index of the first card to show
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn animation_frame(mut self, frame: u64) -> Self {
        self.animation_frame = frame;
        self
    }
}

impl Widget for ItineraryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.phase {
            SearchPhase::Results { itineraries, .. } if !itineraries.is_empty() => {
                format!(" Flights ({}) ", itineraries.len())
            }
            _ => " Flights ".to_string(),
        };
        let block = styles::glass_block(false).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 4 {
            return;
        }

        let itineraries = match self.phase {
            SearchPhase::Submitting { .. } => {
                let line = Line::from(vec![
                    Span::styled(icons::spinner(self.animation_frame), styles::accent()),
                    Span::raw(" "),
                    Span::styled(SEARCHING_TEXT, styles::text_secondary()),
                ]);
                buf.set_line(inner.x + 1, inner.y, &line, inner.width - 1);
                return;
            }
            SearchPhase::Results { itineraries, .. } if itineraries.is_empty() => {
                buf.set_string(inner.x + 1, inner.y, NO_FLIGHTS_TEXT, styles::text_muted());
                return;
            }
            SearchPhase::Results { itineraries, .. } => itineraries,
            SearchPhase::Editing | SearchPhase::Selected { .. } => {
                buf.set_string(inner.x + 1, inner.y, IDLE_TEXT, styles::text_muted());
                return;
            }
        };

        let bottom = inner.y + inner.height;
        let mut y = inner.y;
        for itinerary in itineraries.iter().skip(self.scroll) {
            if y >= bottom {
                break;
            }
            let lines = card_lines(itinerary);
            for line in &lines {
                if y >= bottom {
                    break;
                }
                buf.set_line(inner.x + 1, y, line, inner.width - 1);
                y += 1;
            }
            // Separator row between cards
            y += 1;
        }
    }
}

/// Text lines for one itinerary card
pub(crate) fn card_lines(itinerary: &Itinerary) -> Vec<Line<'_>> {
    let mut header = vec![Span::styled(itinerary.formatted_price(), styles::price())];
    for tag in &itinerary.tags {
        header.push(Span::raw(" "));
        header.push(Span::styled(format!(" {} ", tag), styles::tag()));
    }

    let mut lines = vec![Line::from(header)];
    for leg in &itinerary.legs {
        lines.push(route_line(leg));
        lines.push(Line::from(vec![
            Span::styled("  Depart ", styles::text_muted()),
            Span::styled(format_time(leg.departure.as_deref()), styles::text_primary()),
            Span::styled("  Arrive ", styles::text_muted()),
            Span::styled(format_time(leg.arrival.as_deref()), styles::text_primary()),
            Span::styled("  ", styles::text_muted()),
            Span::styled(format_duration(leg.duration_in_minutes), styles::text_secondary()),
            Span::styled("  ", styles::text_muted()),
            Span::styled(format_stops(leg.stop_count), stops_style(leg.stop_count)),
        ]));
        for segment in &leg.segments {
            lines.push(Line::from(vec![
                Span::styled("    ", styles::text_muted()),
                Span::styled(segment.flight_code(), styles::accent()),
                Span::raw(" "),
                Span::styled(
                    format!(
                        "{} {} {}",
                        place_code(segment.origin.as_ref()),
                        icons::ARROW,
                        place_code(segment.destination.as_ref())
                    ),
                    styles::text_secondary(),
                ),
                Span::raw(" "),
                Span::styled(
                    format_time(segment.departure.as_deref()),
                    styles::text_muted(),
                ),
            ]));
        }
    }
    lines
}

fn route_line(leg: &Leg) -> Line<'_> {
    Line::from(vec![
        Span::styled("  ", styles::text_muted()),
        Span::styled(place_label(leg.origin.as_ref()), styles::text_primary()),
        Span::styled(format!(" {} ", icons::ARROW), styles::accent()),
        Span::styled(place_label(leg.destination.as_ref()), styles::text_primary()),
    ])
}

/// `Name (CODE)`, degrading to whichever half is present
pub(crate) fn place_label(place: Option<&Place>) -> String {
    let name = place.and_then(|p| p.name.as_deref());
    let code = place.and_then(|p| p.display_code.as_deref());
    match (name, code) {
        (Some(name), Some(code)) => format!("{} ({})", name, code),
        (Some(name), None) => name.to_string(),
        (None, Some(code)) => code.to_string(),
        (None, None) => "?".to_string(),
    }
}

fn place_code(place: Option<&Place>) -> &str {
    place
        .and_then(|p| p.display_code.as_deref().or(p.name.as_deref()))
        .unwrap_or("?")
}

/// `2024-12-18T08:30:00` as `Dec 18 08:30`; unparseable values pass through
pub(crate) fn format_time(value: Option<&str>) -> String {
    match value {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .map(|dt| dt.format("%b %d %H:%M").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "--".to_string(),
    }
}

pub(crate) fn format_duration(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m >= 60 => format!("{}h {}m", m / 60, m % 60),
        Some(m) => format!("{}m", m),
        None => "--".to_string(),
    }
}

pub(crate) fn format_stops(stops: Option<u32>) -> String {
    match stops {
        Some(0) => "Direct".to_string(),
        Some(1) => "1 stop".to_string(),
        Some(n) => format!("{} stops", n),
        None => "--".to_string(),
    }
}

fn stops_style(stops: Option<u32>) -> Style {
    match stops {
        Some(0) => Style::default().fg(palette::STATUS_GREEN),
        _ => Style::default().fg(palette::STATUS_YELLOW),
    }
}
