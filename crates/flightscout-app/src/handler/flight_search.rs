//! Destination selection and flight search handlers
//!
//! The selection phase only moves to `Selected` through a validated
//! suggestion pick, and editing the destination text away from the picked
//! name drops back to `Editing`. Submitting builds the immutable
//! [`SearchCriteria`] from the selection and the form fields.

use chrono::Local;

use flightscout_core::prelude::*;
use flightscout_core::{AirportRef, Itinerary, Notification, SearchCriteria};

use crate::autocomplete::{LookupOutcome, LookupTicket};
use crate::message::Message;
use crate::state::{AirportSearch, AppState, RequestId, Screen, SearchPhase};

use super::{UpdateAction, UpdateResult};

pub const NO_DESTINATION_MESSAGE: &str = "Please select a valid destination.";
pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid travel date.";
pub const FLIGHTS_FAILED_MESSAGE: &str = "Error fetching flights";

pub fn handle_destination_query_changed(state: &mut AppState, text: String) -> UpdateResult {
    let Some(search) = state.flight_search_mut() else {
        return UpdateResult::none();
    };

    let invalidates_selection = search
        .selected_destination()
        .is_some_and(|destination| destination.name() != text);
    if invalidates_selection {
        debug!("destination edited, selection cleared");
        search.phase = SearchPhase::Editing;
        search.results_scroll = 0;
    }

    match search.destination.on_query_change(text) {
        Some(scheduled) => {
            UpdateResult::action(UpdateAction::ScheduleDestinationLookup(scheduled))
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_debounce_elapsed(state: &mut AppState, ticket: LookupTicket) -> UpdateResult {
    let Some(search) = state.flight_search_mut() else {
        return UpdateResult::none();
    };
    match search.destination.on_debounce_elapsed(ticket) {
        Some(request) => UpdateResult::action(UpdateAction::LookupDestinations(request)),
        None => UpdateResult::none(),
    }
}

pub fn handle_lookup_completed(
    state: &mut AppState,
    ticket: LookupTicket,
    outcome: LookupOutcome,
) -> UpdateResult {
    let Some(search) = state.flight_search_mut() else {
        return UpdateResult::none();
    };
    match search.destination.on_lookup_completed(ticket, outcome) {
        Some(notification) => UpdateResult::notify(notification),
        None => UpdateResult::none(),
    }
}

pub fn handle_select_destination(state: &mut AppState, candidate: AirportRef) -> UpdateResult {
    let Some(search) = state.flight_search_mut() else {
        return UpdateResult::none();
    };
    match search.destination.on_suggestion_select(&candidate) {
        Ok(destination) => {
            info!(
                "destination selected: {} ({}/{})",
                destination.name(),
                destination.sky_id(),
                destination.entity_id()
            );
            search.phase = SearchPhase::Selected { destination };
            UpdateResult::none()
        }
        Err(notification) => UpdateResult::notify(notification),
    }
}

/// Validate the form and start the flight search
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let today = Local::now().date_naive();

    let criteria = {
        let Some(search) = state.flight_search() else {
            return UpdateResult::none();
        };
        if search.phase.is_submitting() {
            debug!("flight search already in flight, submit ignored");
            return UpdateResult::none();
        }
        let Some(destination) = search.selected_destination() else {
            return UpdateResult::notify(Notification::warning(NO_DESTINATION_MESSAGE));
        };
        let Some(date) = search.travel_date(today) else {
            return UpdateResult::notify(Notification::warning(INVALID_DATE_MESSAGE));
        };
        SearchCriteria::new(
            search.origin.clone(),
            destination.clone(),
            date,
            search.adults,
            search.cabin_class,
        )
    };

    let request = state.next_request_id();
    let Some(search) = state.flight_search_mut() else {
        return UpdateResult::none();
    };
    info!(
        "searching flights {} -> {} on {} ({} adult(s), {})",
        criteria.origin().sky_id(),
        criteria.destination().sky_id(),
        criteria.date_param(),
        criteria.adults(),
        criteria.cabin_class()
    );
    search.phase = SearchPhase::Submitting {
        criteria: criteria.clone(),
        request,
    };
    search.results_scroll = 0;
    UpdateResult::action(UpdateAction::SearchFlights { request, criteria })
}

pub fn handle_flight_search_completed(
    state: &mut AppState,
    request: RequestId,
    result: std::result::Result<Vec<Itinerary>, String>,
) -> UpdateResult {
    let Some(search) = state.flight_search_mut() else {
        return UpdateResult::none();
    };

    let current = matches!(
        &search.phase,
        SearchPhase::Submitting { request: pending, .. } if *pending == request
    );
    if !current {
        trace!("ignoring stale flight search {:?}", request);
        return UpdateResult::none();
    }
    let SearchPhase::Submitting { criteria, .. } = std::mem::take(&mut search.phase) else {
        return UpdateResult::none();
    };

    match result {
        Ok(itineraries) => {
            info!("{} itineraries found", itineraries.len());
            search.phase = SearchPhase::Results {
                criteria,
                itineraries,
            };
            UpdateResult::none()
        }
        Err(reason) => {
            warn!("flight search failed: {}", reason);
            search.phase = SearchPhase::Selected {
                destination: criteria.destination().clone(),
            };
            UpdateResult::notify(Notification::error(FLIGHTS_FAILED_MESSAGE))
        }
    }
}

pub fn handle_scroll(state: &mut AppState, delta: isize) -> UpdateResult {
    if let Some(search) = state.flight_search_mut() {
        let max = search.phase.itineraries().len().saturating_sub(1);
        search.results_scroll = search
            .results_scroll
            .saturating_add_signed(delta)
            .min(max);
    }
    UpdateResult::none()
}

/// Drop the flight search and go back to picking an origin
pub fn handle_back(state: &mut AppState) -> UpdateResult {
    if state.flight_search().is_none() {
        return UpdateResult::none();
    }
    debug!("back to airport selection");
    state.screen = Screen::AirportSelection(AirportSearch::new());
    UpdateResult::message(Message::LoadNearbyAirports)
}
