//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action becomes one tokio task. Tasks never touch `AppState`; they
//! report back by posting a `Message` on `msg_tx`.

use std::sync::Arc;

use flightscout_gateway::{Locator, TravelApi};
use tokio::sync::mpsc;

use crate::message::Message;
use crate::UpdateAction;

mod lookups;

/// Remote services shared by every background task
pub struct Services<A, L> {
    pub api: Arc<A>,
    pub locator: Arc<L>,
}

impl<A, L> Services<A, L> {
    pub fn new(api: A, locator: L) -> Self {
        Self {
            api: Arc::new(api),
            locator: Arc::new(locator),
        }
    }
}

impl<A, L> Clone for Services<A, L> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            locator: self.locator.clone(),
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<A, L>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<A, L>,
) where
    A: TravelApi + Sync + 'static,
    L: Locator + Sync + 'static,
{
    match action {
        UpdateAction::LoadNearbyAirports { request } => {
            lookups::spawn_nearby_lookup(
                request,
                services.api.clone(),
                services.locator.clone(),
                msg_tx,
            );
        }

        UpdateAction::SearchAirports { request, query } => {
            lookups::spawn_airport_search(request, query, services.api.clone(), msg_tx);
        }

        UpdateAction::ScheduleDestinationLookup(scheduled) => {
            lookups::spawn_debounce_timer(scheduled, msg_tx);
        }

        UpdateAction::LookupDestinations(request) => {
            lookups::spawn_destination_lookup(request, services.api.clone(), msg_tx);
        }

        UpdateAction::SearchFlights { request, criteria } => {
            lookups::spawn_flight_search(request, criteria, services.api.clone(), msg_tx);
        }
    }
}
