//! Origin airport screen: query input plus the nearby/search result list

use flightscout_app::state::{AirportFocus, AirportSearch};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{icons, styles};

pub const LOADING_TEXT: &str = "Fetching nearby airports...";
pub const EMPTY_TEXT: &str = "No results found.";

/// Airport selection widget
pub struct AirportList<'a> {
    search: &'a AirportSearch,
    animation_frame: u64,
}

impl<'a> AirportList<'a> {
    pub fn new(search: &'a AirportSearch) -> Self {
        Self {
            search,
            animation_frame: 0,
        }
    }

    pub fn animation_frame(mut self, frame: u64) -> Self {
        self.animation_frame = frame;
        self
    }

    fn render_query(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.search.focus == AirportFocus::Query;
        let block = styles::glass_block(focused).title(" Search airports ");

        let mut spans = vec![Span::styled(&self.search.query, styles::text_primary())];
        if focused {
            spans.push(Span::styled(icons::CURSOR, styles::accent()));
        }
        if self.search.query.is_empty() && !focused {
            spans.push(Span::styled("type a city or airport", styles::text_muted()));
        }
        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.search.focus == AirportFocus::List;
        let block = styles::glass_block(focused).title(" Airports ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.search.loading {
            let line = Line::from(vec![
                Span::styled(icons::spinner(self.animation_frame), styles::accent()),
                Span::raw(" "),
                Span::styled(LOADING_TEXT, styles::text_secondary()),
            ]);
            buf.set_line(inner.x + 1, inner.y, &line, inner.width.saturating_sub(1));
            return;
        }

        if self.search.results.is_empty() {
            buf.set_string(inner.x + 1, inner.y, EMPTY_TEXT, styles::text_muted());
            return;
        }

        // Two rows per record; keep the highlighted one in view
        let per_page = (inner.height / 2).max(1) as usize;
        let first = self.search.highlighted.saturating_sub(per_page - 1);

        for (row, (idx, record)) in self
            .search
            .results
            .iter()
            .enumerate()
            .skip(first)
            .take(per_page)
            .enumerate()
        {
            let y = inner.y + (row as u16) * 2;
            let highlighted = idx == self.search.highlighted;
            let title_style = if highlighted && focused {
                styles::focused_selected()
            } else if highlighted {
                styles::accent_bold()
            } else {
                styles::text_primary()
            };

            let marker = if highlighted { "▶ " } else { "  " };
            let title = Line::from(vec![
                Span::styled(marker, styles::accent()),
                Span::styled(record.display_name(), title_style),
            ]);
            buf.set_line(inner.x, y, &title, inner.width);

            if let Some(subtitle) = record.subtitle() {
                if y + 1 < inner.y + inner.height {
                    buf.set_string(inner.x + 2, y + 1, subtitle, styles::text_muted());
                }
            }
        }
    }
}

impl Widget for AirportList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [query, results] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.render_query(query, buf);
        self.render_results(results, buf);
    }
}
