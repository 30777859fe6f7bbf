//! Header bar widget

use flightscout_core::AirportRef;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons, styles};

/// Header widget: app title, current screen, and the origin once picked
pub struct MainHeader<'a> {
    origin: Option<&'a AirportRef>,
}

impl<'a> MainHeader<'a> {
    pub fn new(origin: Option<&'a AirportRef>) -> Self {
        Self { origin }
    }

    fn screen_title(&self) -> &'static str {
        if self.origin.is_some() {
            "Search flights"
        } else {
            "Choose departure airport"
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = Line::from(vec![
            Span::raw(" "),
            Span::styled(icons::PLANE, styles::accent()),
            Span::raw(" "),
            Span::styled("flightscout", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.screen_title(), styles::text_secondary()),
        ]);
        let left_width = left.width() as u16;
        buf.set_line(inner.x, inner.y, &left, inner.width);

        // Right-aligned origin pill, dropped when it would overlap the title
        if let Some(origin) = self.origin {
            let pill = Line::from(vec![
                Span::styled("from ", styles::text_muted()),
                Span::styled(origin.name(), styles::text_primary()),
                Span::styled(format!(" ({}) ", origin.sky_id()), styles::accent()),
            ]);
            let pill_width = pill.width() as u16;
            if left_width + pill_width + 2 <= inner.width {
                let x = inner.x + inner.width - pill_width;
                buf.set_line(x, inner.y, &pill, pill_width);
            }
        }
    }
}
