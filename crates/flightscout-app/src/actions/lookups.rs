//! Background tasks for travel API calls and the destination debounce timer

use std::sync::Arc;

use tokio::sync::mpsc;

use flightscout_core::prelude::*;
use flightscout_core::SearchCriteria;
use flightscout_gateway::{Locator, TravelApi};

use crate::autocomplete::{LookupOutcome, LookupRequest, ScheduledLookup};
use crate::message::{Message, NearbyOutcome};
use crate::state::RequestId;

/// Post a task result. A closed channel means the app is shutting down.
async fn post(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if msg_tx.send(message).await.is_err() {
        debug!("message channel closed, dropping task result");
    }
}

pub(super) fn spawn_nearby_lookup<A, L>(
    request: RequestId,
    api: Arc<A>,
    locator: Arc<L>,
    msg_tx: mpsc::Sender<Message>,
) where
    A: TravelApi + Sync + 'static,
    L: Locator + Sync + 'static,
{
    tokio::spawn(async move {
        let outcome = match locator.locate().await {
            Err(e) => NearbyOutcome::LocationUnavailable(e.to_string()),
            Ok(coords) => {
                debug!("looking up airports near {}, {}", coords.latitude, coords.longitude);
                match api.lookup_nearby(coords.latitude, coords.longitude).await {
                    Ok(nearby) => NearbyOutcome::Found(nearby.nearby),
                    Err(e) => NearbyOutcome::Failed(e.to_string()),
                }
            }
        };
        post(&msg_tx, Message::NearbyAirportsLoaded { request, outcome }).await;
    });
}

pub(super) fn spawn_airport_search<A>(
    request: RequestId,
    query: String,
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
) where
    A: TravelApi + Sync + 'static,
{
    tokio::spawn(async move {
        // Origin searches are explicit and never superseded by typing.
        let result = api
            .search_airports(&query, &flightscout_gateway::CancelToken::new())
            .await
            .map_err(|e| e.to_string());
        post(&msg_tx, Message::AirportSearchCompleted { request, result }).await;
    });
}

/// Sleep for the debounce delay, then report unless the timer was cancelled
pub(super) fn spawn_debounce_timer(scheduled: ScheduledLookup, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let ScheduledLookup {
            ticket,
            delay,
            timer,
            ..
        } = scheduled;
        tokio::select! {
            biased;
            _ = timer.cancelled() => {
                trace!("debounce {:?} cancelled", ticket);
            }
            _ = tokio::time::sleep(delay) => {
                post(&msg_tx, Message::DestinationDebounceElapsed { ticket }).await;
            }
        }
    });
}

pub(super) fn spawn_destination_lookup<A>(
    request: LookupRequest,
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
) where
    A: TravelApi + Sync + 'static,
{
    tokio::spawn(async move {
        let LookupRequest {
            ticket,
            query,
            cancel,
        } = request;
        debug!("destination lookup {:?} for {:?}", ticket, query);
        let outcome = LookupOutcome::from(api.search_airports(&query, &cancel).await);
        post(&msg_tx, Message::DestinationLookupCompleted { ticket, outcome }).await;
    });
}

pub(super) fn spawn_flight_search<A>(
    request: RequestId,
    criteria: SearchCriteria,
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
) where
    A: TravelApi + Sync + 'static,
{
    tokio::spawn(async move {
        let result = api
            .search_flights(&criteria)
            .await
            .map(|results| results.itineraries)
            .map_err(|e| e.to_string());
        post(&msg_tx, Message::FlightSearchCompleted { request, result }).await;
    });
}
