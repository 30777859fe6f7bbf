//! Notification toast

use flightscout_core::Notification;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::layout;
use crate::theme::styles;

/// Toast in the top-right corner of its area, bordered in the severity colour
pub struct Toast<'a> {
    notification: &'a Notification,
}

impl<'a> Toast<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    /// Width of the text inside the border: icon, space, message
    pub fn content_width(&self) -> u16 {
        let (icon, _, _) = styles::severity_indicator(self.notification.severity);
        (icon.width() + 1 + self.notification.message.width()) as u16
    }
}

impl Widget for Toast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let toast_area = layout::toast_area(area, self.content_width());
        if toast_area.height < 3 {
            return;
        }

        let (icon, label, style) = styles::severity_indicator(self.notification.severity);
        let block = styles::popup_block()
            .border_style(style)
            .title(format!(" {} ", label));

        Clear.render(toast_area, buf);
        Paragraph::new(Line::from(vec![
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled(self.notification.message.as_str(), styles::text_primary()),
        ]))
        .block(block)
        .render(toast_area, buf);
    }
}
