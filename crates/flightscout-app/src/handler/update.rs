//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use flightscout_core::prelude::*;
use flightscout_core::Severity;

use crate::message::Message;
use crate::state::AppState;

use super::{airport_search, flight_search, keys::handle_key, UpdateResult};

/// Process a message and update state
/// Returns an optional action for the event loop to execute
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.animation_frame = state.animation_frame.wrapping_add(1);
            state.expire_toast(Instant::now());
            UpdateResult::none()
        }

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Notify(notification) => {
            match notification.severity {
                Severity::Error => error!("{}", notification.message),
                Severity::Warning => warn!("{}", notification.message),
                Severity::Info => info!("{}", notification.message),
            }
            state.show_notification(notification, Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Airport Selection
        // ─────────────────────────────────────────────────────────
        Message::LoadNearbyAirports => airport_search::handle_load_nearby(state),

        Message::NearbyAirportsLoaded { request, outcome } => {
            airport_search::handle_nearby_loaded(state, request, outcome)
        }

        Message::AirportQueryChanged(query) => {
            airport_search::handle_query_changed(state, query)
        }

        Message::SearchAirports => airport_search::handle_search(state),

        Message::AirportSearchCompleted { request, result } => {
            airport_search::handle_search_completed(state, request, result)
        }

        Message::AirportHighlightNext => {
            if let Some(search) = state.airport_search_mut() {
                search.highlight_next();
            }
            UpdateResult::none()
        }

        Message::AirportHighlightPrev => {
            if let Some(search) = state.airport_search_mut() {
                search.highlight_prev();
            }
            UpdateResult::none()
        }

        Message::AirportFocusToggle => airport_search::handle_focus_toggle(state),

        Message::SelectOrigin(record) => airport_search::handle_select_origin(state, record),

        // ─────────────────────────────────────────────────────────
        // Flight Search
        // ─────────────────────────────────────────────────────────
        Message::DestinationQueryChanged(text) => {
            flight_search::handle_destination_query_changed(state, text)
        }

        Message::DestinationDebounceElapsed { ticket } => {
            flight_search::handle_debounce_elapsed(state, ticket)
        }

        Message::DestinationLookupCompleted { ticket, outcome } => {
            flight_search::handle_lookup_completed(state, ticket, outcome)
        }

        Message::SuggestionHighlightNext => {
            if let Some(search) = state.flight_search_mut() {
                search.destination.highlight_next();
            }
            UpdateResult::none()
        }

        Message::SuggestionHighlightPrev => {
            if let Some(search) = state.flight_search_mut() {
                search.destination.highlight_prev();
            }
            UpdateResult::none()
        }

        Message::SelectDestination(candidate) => {
            flight_search::handle_select_destination(state, candidate)
        }

        Message::TravelDateChanged(text) => {
            if let Some(search) = state.flight_search_mut() {
                search.date_input = text;
            }
            UpdateResult::none()
        }

        Message::AdultsIncrement => {
            if let Some(search) = state.flight_search_mut() {
                search.increment_adults();
            }
            UpdateResult::none()
        }

        Message::AdultsDecrement => {
            if let Some(search) = state.flight_search_mut() {
                search.decrement_adults();
            }
            UpdateResult::none()
        }

        Message::CabinClassNext => {
            if let Some(search) = state.flight_search_mut() {
                search.cabin_class = search.cabin_class.next();
            }
            UpdateResult::none()
        }

        Message::CabinClassPrev => {
            if let Some(search) = state.flight_search_mut() {
                search.cabin_class = search.cabin_class.prev();
            }
            UpdateResult::none()
        }

        Message::FocusNext => {
            if let Some(search) = state.flight_search_mut() {
                search.focus = search.focus.next();
            }
            UpdateResult::none()
        }

        Message::FocusPrev => {
            if let Some(search) = state.flight_search_mut() {
                search.focus = search.focus.prev();
            }
            UpdateResult::none()
        }

        Message::SubmitSearch => flight_search::handle_submit(state),

        Message::FlightSearchCompleted { request, result } => {
            flight_search::handle_flight_search_completed(state, request, result)
        }

        Message::ResultsScrollDown => flight_search::handle_scroll(state, 1),

        Message::ResultsScrollUp => flight_search::handle_scroll(state, -1),

        Message::Back => flight_search::handle_back(state),
    }
}
