//! Main render/view function (View in TEA pattern)


use flightscout_app::state::{AppState, FormField, Screen};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure rendering; the state is only read.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    frame.render_widget(widgets::MainHeader::new(state.origin()), areas.header);

    match &state.screen {
        Screen::AirportSelection(search) => {
            frame.render_widget(
                widgets::AirportList::new(search).animation_frame(state.animation_frame),
                areas.body,
            );
            frame.render_widget(widgets::KeyHints::airport_selection(), areas.footer);
        }
        Screen::FlightSearch(search) => {
            let form = layout::create_form(areas.body);

            frame.render_widget(
                widgets::ItineraryList::new(&search.phase)
                    .scroll(search.results_scroll)
                    .animation_frame(state.animation_frame),
                form.results,
            );
            frame.render_widget(
                widgets::SearchForm::new(search).animation_frame(state.animation_frame),
                areas.body,
            );

            // Dropdown overlays the fields below the destination input
            let suggestions = search.destination.suggestions();
            if search.focus == FormField::Destination && !suggestions.is_empty() {
                let dropdown =
                    layout::suggestions_area(form.destination, suggestions.len(), areas.body);
                frame.render_widget(widgets::Suggestions::new(&search.destination), dropdown);
            }

            frame.render_widget(widgets::KeyHints::flight_search(), areas.footer);
        }
    }

    if let Some(toast) = &state.toast {
        frame.render_widget(widgets::Toast::new(&toast.notification), areas.body);
    }
}
