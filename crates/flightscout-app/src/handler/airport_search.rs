//! Origin airport selection handlers

use flightscout_core::prelude::*;
use flightscout_core::{AirportRecord, AirportRef, Notification};

use crate::message::NearbyOutcome;
use crate::state::{AirportFocus, AppState, FlightSearch, RequestId, Screen};

use super::{UpdateAction, UpdateResult};

pub const LOCATION_UNAVAILABLE_MESSAGE: &str = "Unable to determine your location";
pub const NEARBY_FAILED_MESSAGE: &str = "Error fetching nearby airports";
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching airports";
pub const INVALID_ORIGIN_MESSAGE: &str = "Selected airport does not have valid identifiers.";

/// Start the nearby-airports lookup
pub fn handle_load_nearby(state: &mut AppState) -> UpdateResult {
    if state.airport_search().is_none() {
        return UpdateResult::none();
    }
    let request = state.next_request_id();
    if let Some(search) = state.airport_search_mut() {
        search.begin_request(request);
    }
    UpdateResult::action(UpdateAction::LoadNearbyAirports { request })
}

pub fn handle_nearby_loaded(
    state: &mut AppState,
    request: RequestId,
    outcome: NearbyOutcome,
) -> UpdateResult {
    let Some(search) = state.airport_search_mut() else {
        return UpdateResult::none();
    };
    if !search.finish_request(request) {
        trace!("ignoring stale nearby result {:?}", request);
        return UpdateResult::none();
    }

    match outcome {
        NearbyOutcome::Found(records) => {
            debug!("{} nearby airports", records.len());
            search.set_results(records);
            UpdateResult::none()
        }
        NearbyOutcome::LocationUnavailable(reason) => {
            warn!("location unavailable: {}", reason);
            search.set_results(Vec::new());
            UpdateResult::notify(Notification::error(LOCATION_UNAVAILABLE_MESSAGE))
        }
        NearbyOutcome::Failed(reason) => {
            warn!("nearby airports lookup failed: {}", reason);
            search.set_results(Vec::new());
            UpdateResult::notify(Notification::error(NEARBY_FAILED_MESSAGE))
        }
    }
}

pub fn handle_query_changed(state: &mut AppState, query: String) -> UpdateResult {
    if let Some(search) = state.airport_search_mut() {
        search.query = query;
    }
    UpdateResult::none()
}

/// Run the free-text search. Ignored while a request is outstanding or the
/// query is blank.
pub fn handle_search(state: &mut AppState) -> UpdateResult {
    let query = match state.airport_search() {
        Some(search) if !search.loading && !search.query.trim().is_empty() => {
            search.query.trim().to_string()
        }
        _ => return UpdateResult::none(),
    };

    let request = state.next_request_id();
    if let Some(search) = state.airport_search_mut() {
        search.begin_request(request);
    }
    UpdateResult::action(UpdateAction::SearchAirports { request, query })
}

pub fn handle_search_completed(
    state: &mut AppState,
    request: RequestId,
    result: std::result::Result<Vec<AirportRecord>, String>,
) -> UpdateResult {
    let Some(search) = state.airport_search_mut() else {
        return UpdateResult::none();
    };
    if !search.finish_request(request) {
        trace!("ignoring stale airport search {:?}", request);
        return UpdateResult::none();
    }

    match result {
        Ok(records) => {
            search.set_results(records);
            if !search.results.is_empty() {
                search.focus = AirportFocus::List;
            }
            UpdateResult::none()
        }
        Err(reason) => {
            warn!("airport search for {:?} failed: {}", search.query, reason);
            search.set_results(Vec::new());
            UpdateResult::notify(Notification::error(SEARCH_FAILED_MESSAGE))
        }
    }
}

pub fn handle_focus_toggle(state: &mut AppState) -> UpdateResult {
    if let Some(search) = state.airport_search_mut() {
        search.focus = match search.focus {
            AirportFocus::Query => AirportFocus::List,
            AirportFocus::List => AirportFocus::Query,
        };
    }
    UpdateResult::none()
}

/// Move to the flight search screen if `record` can be used as an origin
pub fn handle_select_origin(state: &mut AppState, record: AirportRecord) -> UpdateResult {
    if state.airport_search().is_none() {
        return UpdateResult::none();
    }

    match AirportRef::from_record(&record) {
        Some(origin) => {
            info!(
                "origin selected: {} ({}/{})",
                origin.name(),
                origin.sky_id(),
                origin.entity_id()
            );
            state.screen = Screen::FlightSearch(Box::new(FlightSearch::new(origin)));
            UpdateResult::none()
        }
        None => UpdateResult::notify(Notification::warning(INVALID_ORIGIN_MESSAGE)),
    }
}
