//! Destination suggestion dropdown

use flightscout_app::DestinationSearch;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

use crate::theme::styles;

/// Dropdown listing validated destination suggestions under the input
pub struct Suggestions<'a> {
    destination: &'a DestinationSearch,
}

impl<'a> Suggestions<'a> {
    pub fn new(destination: &'a DestinationSearch) -> Self {
        Self { destination }
    }
}

impl Widget for Suggestions<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let suggestions = self.destination.suggestions();
        if suggestions.is_empty() || area.height < 3 {
            return;
        }

        Clear.render(area, buf);
        let block = styles::popup_block();
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = inner.height as usize;
        let highlighted = self.destination.highlighted();
        let first = highlighted.saturating_sub(rows.saturating_sub(1));

        for (row, (idx, candidate)) in suggestions
            .iter()
            .enumerate()
            .skip(first)
            .take(rows)
            .enumerate()
        {
            let selected = idx == highlighted;
            let name_style = if selected {
                styles::focused_selected()
            } else {
                styles::text_primary()
            };
            let line = Line::from(vec![
                Span::styled(candidate.name(), name_style),
                Span::raw(" "),
                Span::styled(candidate.sky_id(), styles::text_muted()),
            ]);
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::test_utils::TestTerminal;
    use flightscout_app::autocomplete::LookupOutcome;
    use flightscout_gateway::test_utils::airport_record;

    fn with_suggestions(names: &[&str]) -> DestinationSearch {
        let mut destination = DestinationSearch::new();
        let scheduled = destination.on_query_change("Lo").unwrap();
        destination.on_debounce_elapsed(scheduled.ticket).unwrap();
        let records = names
            .iter()
            .enumerate()
            .map(|(i, name)| airport_record(name, &format!("S{}", i), &format!("{}", i + 1)))
            .collect();
        destination.on_lookup_completed(scheduled.ticket, LookupOutcome::Found(records));
        destination
    }

    #[test]
    fn test_dropdown_lists_suggestions() {
        let destination = with_suggestions(&["London Heathrow", "Los Angeles"]);
        let mut term = TestTerminal::new();
        let area = layout::suggestions_area(Rect::new(0, 3, 48, 3), 2, term.area());
        term.render_widget(Suggestions::new(&destination), area);

        assert!(term.buffer_contains("London Heathrow S0"));
        assert!(term.buffer_contains("Los Angeles S1"));
    }

    #[test]
    fn test_empty_dropdown_renders_nothing() {
        let destination = DestinationSearch::new();
        let mut term = TestTerminal::new();
        let area = Rect::new(0, 6, 48, 8);
        term.render_widget(Suggestions::new(&destination), area);

        assert!(term.content().trim().is_empty());
    }
}
