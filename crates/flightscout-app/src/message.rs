//! Message types for the application (TEA pattern)

use flightscout_core::{AirportRecord, AirportRef, Itinerary, Notification};

use crate::autocomplete::{LookupOutcome, LookupTicket};
use crate::input_key::InputKey;
use crate::state::RequestId;

/// How the nearby-airports lookup ended
#[derive(Debug, Clone, PartialEq)]
pub enum NearbyOutcome {
    Found(Vec<AirportRecord>),
    /// The user's position could not be resolved
    LocationUnavailable(String),
    /// Position known, but the API call failed
    Failed(String),
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit immediately (Ctrl+C, Esc on the airport screen)
    Quit,

    /// Show a notification to the user
    Notify(Notification),

    // ─────────────────────────────────────────────────────────
    // Airport Selection Messages
    // ─────────────────────────────────────────────────────────
    /// Resolve the user's location and list nearby airports
    LoadNearbyAirports,

    NearbyAirportsLoaded {
        request: RequestId,
        outcome: NearbyOutcome,
    },

    AirportQueryChanged(String),

    /// Run a free-text airport search with the current query
    SearchAirports,

    AirportSearchCompleted {
        request: RequestId,
        result: Result<Vec<AirportRecord>, String>,
    },

    AirportHighlightNext,
    AirportHighlightPrev,

    /// Toggle focus between the query field and the result list
    AirportFocusToggle,

    /// Pick the origin airport
    SelectOrigin(AirportRecord),

    // ─────────────────────────────────────────────────────────
    // Flight Search Messages
    // ─────────────────────────────────────────────────────────
    DestinationQueryChanged(String),

    /// The debounce window for `ticket` closed
    DestinationDebounceElapsed {
        ticket: LookupTicket,
    },

    DestinationLookupCompleted {
        ticket: LookupTicket,
        outcome: LookupOutcome,
    },

    SuggestionHighlightNext,
    SuggestionHighlightPrev,

    /// Pick a destination from the suggestion dropdown
    SelectDestination(AirportRef),

    TravelDateChanged(String),
    AdultsIncrement,
    AdultsDecrement,
    CabinClassNext,
    CabinClassPrev,

    FocusNext,
    FocusPrev,

    SubmitSearch,

    FlightSearchCompleted {
        request: RequestId,
        result: Result<Vec<Itinerary>, String>,
    },

    ResultsScrollDown,
    ResultsScrollUp,

    /// Leave the flight search and pick another origin
    Back,
}
