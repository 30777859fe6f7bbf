//! Flight search form: destination input, travel date, adults, cabin class

use flightscout_app::state::{FlightSearch, FormField, SearchPhase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use crate::layout;
use crate::theme::{icons, palette, styles};

/// The four form inputs laid out by [`layout::create_form`]
pub struct SearchForm<'a> {
    search: &'a FlightSearch,
    animation_frame: u64,
}

impl<'a> SearchForm<'a> {
    pub fn new(search: &'a FlightSearch) -> Self {
        Self {
            search,
            animation_frame: 0,
        }
    }

    pub fn animation_frame(mut self, frame: u64) -> Self {
        self.animation_frame = frame;
        self
    }

    fn focused(&self, field: FormField) -> bool {
        self.search.focus == field
    }

    fn render_input(
        &self,
        area: Rect,
        buf: &mut Buffer,
        field: FormField,
        title: &str,
        value: Line,
    ) {
        let mut line = value;
        if self.focused(field) {
            line.push_span(Span::styled(icons::CURSOR, styles::accent()));
        }
        Paragraph::new(line)
            .block(styles::glass_block(self.focused(field)).title(format!(" {} ", title)))
            .render(area, buf);
    }

    fn destination_line(&self) -> Line<'a> {
        let search: &'a FlightSearch = self.search;
        let destination = &search.destination;
        let mut spans = vec![Span::styled(destination.query(), styles::text_primary())];

        if destination.is_loading() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                icons::spinner(self.animation_frame),
                styles::accent(),
            ));
        } else if let Some(selected) = search.selected_destination() {
            spans.push(Span::styled(
                format!(" ({}) ✓", selected.sky_id()),
                Style::default().fg(palette::STATUS_GREEN),
            ));
        }
        Line::from(spans)
    }

    fn stepper_line(value: String, focused: bool) -> Line<'static> {
        let arrow_style = if focused {
            styles::keybinding()
        } else {
            styles::text_muted()
        };
        Line::from(vec![
            Span::styled("◀ ", arrow_style),
            Span::styled(value, styles::text_primary()),
            Span::styled(" ▶", arrow_style),
        ])
    }
}

impl Widget for SearchForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = layout::create_form(area);
        let form_height = layout::FORM_HEIGHT.min(area.height);
        Clear.render(Rect::new(area.x, area.y, area.width, form_height), buf);

        let destination_title = match self.search.phase {
            SearchPhase::Editing => "To",
            _ => "To (selected)",
        };
        self.render_input(
            areas.destination,
            buf,
            FormField::Destination,
            destination_title,
            self.destination_line(),
        );

        self.render_input(
            areas.date,
            buf,
            FormField::Date,
            "Date (YYYY-MM-DD)",
            Line::from(Span::styled(
                self.search.date_input.as_str(),
                styles::text_primary(),
            )),
        );

        let adults = self.search.adults.get();
        let adults_label = if adults == 1 {
            "1 adult".to_string()
        } else {
            format!("{} adults", adults)
        };
        self.render_input(
            areas.adults,
            buf,
            FormField::Adults,
            "Passengers",
            Self::stepper_line(adults_label, self.focused(FormField::Adults)),
        );

        self.render_input(
            areas.cabin,
            buf,
            FormField::Cabin,
            "Cabin",
            Self::stepper_line(
                self.search.cabin_class.label().to_string(),
                self.focused(FormField::Cabin),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{heathrow, jfk, TestTerminal};
    use chrono::NaiveDate;
    use flightscout_core::CabinClass;

    fn render(search: &FlightSearch) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(SearchForm::new(search), Rect::new(0, 3, 80, 20));
        term
    }

    fn search() -> FlightSearch {
        FlightSearch::with_date(heathrow(), NaiveDate::from_ymd_opt(2024, 12, 18).unwrap())
    }

    #[test]
    fn test_form_shows_defaults() {
        let term = render(&search());
        assert!(term.buffer_contains("2024-12-18"));
        assert!(term.buffer_contains("1 adult"));
        assert!(term.buffer_contains("Economy"));
        assert!(term.buffer_contains(" To "));
    }

    #[test]
    fn test_selected_destination_is_marked() {
        let mut search = search();
        search.phase = SearchPhase::Selected { destination: jfk() };
        let term = render(&search);
        assert!(term.buffer_contains("To (selected)"));
        assert!(term.buffer_contains("(JFK) ✓"));
    }

    #[test]
    fn test_adults_pluralised() {
        let mut search = search();
        search.increment_adults();
        search.increment_adults();
        assert!(render(&search).buffer_contains("3 adults"));
    }

    #[test]
    fn test_cabin_class_label() {
        let mut search = search();
        search.cabin_class = CabinClass::First;
        assert!(render(&search).buffer_contains("First"));
    }
}
