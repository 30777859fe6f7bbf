//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event to message mapping per screen
//! - `airport_search`: Origin airport selection
//! - `flight_search`: Destination selection, form and flight search

pub(crate) mod airport_search;
pub(crate) mod flight_search;
pub(crate) mod keys;
pub(crate) mod update;


use flightscout_core::SearchCriteria;

use crate::autocomplete::{LookupRequest, ScheduledLookup};
use crate::message::Message;
use crate::state::RequestId;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Resolve the user's location, then fetch nearby airports
    LoadNearbyAirports { request: RequestId },

    /// Free-text airport search for the origin screen
    SearchAirports { request: RequestId, query: String },

    /// Arm the destination debounce timer.
    ///
    /// The task posts `DestinationDebounceElapsed` after the delay unless the
    /// timer token is cancelled first.
    ScheduleDestinationLookup(ScheduledLookup),

    /// Run a destination lookup and post `DestinationLookupCompleted`
    LookupDestinations(LookupRequest),

    /// One-way flight search
    SearchFlights {
        request: RequestId,
        criteria: SearchCriteria,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// Follow-up notification, no action
    pub fn notify(notification: flightscout_core::Notification) -> Self {
        Self::message(Message::Notify(notification))
    }
}
