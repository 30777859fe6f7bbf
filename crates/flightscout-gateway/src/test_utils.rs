//! Test utilities for gateway consumers
//!
//! - [`FakeTravelApi`]: scripted in-memory [`TravelApi`]
//! - [`StubServer`]: one-response HTTP server on localhost
//! - record builders for airport fixtures

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use flightscout_core::prelude::*;
use flightscout_core::{
    AirportRecord, FlightParams, Itinerary, Navigation, Presentation, SearchCriteria,
};

use crate::api::{FlightResults, NearbyAirports, TravelApi};
use crate::cancel::CancelToken;

// ─────────────────────────────────────────────────────────────────
// Record builders
// ─────────────────────────────────────────────────────────────────

/// An airport record with both flight identifiers
pub fn airport_record(title: &str, sky_id: &str, entity_id: &str) -> AirportRecord {
    AirportRecord {
        name: Some(title.to_string()),
        presentation: Some(Presentation {
            title: Some(title.to_string()),
            subtitle: Some("Test Country".to_string()),
            ..Default::default()
        }),
        navigation: Some(Navigation {
            relevant_flight_params: Some(FlightParams {
                sky_id: Some(sky_id.to_string()),
                entity_id: Some(entity_id.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// An airport record with no flight identifiers
pub fn bare_record(title: &str) -> AirportRecord {
    AirportRecord {
        name: Some(title.to_string()),
        presentation: Some(Presentation {
            title: Some(title.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn itinerary(id: &str) -> Itinerary {
    Itinerary {
        id: id.to_string(),
        ..Default::default()
    }
}

// ─────────────────────────────────────────────────────────────────
// FakeTravelApi
// ─────────────────────────────────────────────────────────────────

/// A call observed by [`FakeTravelApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Nearby { latitude: f64, longitude: f64 },
    Airports { query: String },
    Flights { criteria: SearchCriteria },
}

#[derive(Debug, Default)]
struct FakeState {
    nearby: VecDeque<std::result::Result<NearbyAirports, String>>,
    airports: HashMap<String, std::result::Result<Vec<AirportRecord>, String>>,
    flights: VecDeque<std::result::Result<FlightResults, String>>,
    airport_delay: Option<Duration>,
    calls: Vec<FakeCall>,
}

/// Scripted travel API. Unscripted calls succeed with empty payloads.
#[derive(Debug, Clone, Default)]
pub struct FakeTravelApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTravelApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state(&self, f: impl FnOnce(&mut FakeState)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state);
    }

    pub fn push_nearby(&self, nearby: Vec<AirportRecord>) -> &Self {
        self.with_state(|s| {
            s.nearby.push_back(Ok(NearbyAirports {
                nearby,
                ..Default::default()
            }))
        });
        self
    }

    pub fn fail_nearby(&self, reason: &str) -> &Self {
        self.with_state(|s| s.nearby.push_back(Err(reason.to_string())));
        self
    }

    pub fn set_airports(&self, query: &str, records: Vec<AirportRecord>) -> &Self {
        self.with_state(|s| {
            s.airports.insert(query.to_string(), Ok(records));
        });
        self
    }

    pub fn fail_airports(&self, query: &str, reason: &str) -> &Self {
        self.with_state(|s| {
            s.airports.insert(query.to_string(), Err(reason.to_string()));
        });
        self
    }

    /// Make every airport search wait this long (cancellable) before answering
    pub fn delay_airports(&self, delay: Duration) -> &Self {
        self.with_state(|s| s.airport_delay = Some(delay));
        self
    }

    pub fn push_flights(&self, itineraries: Vec<Itinerary>) -> &Self {
        self.with_state(|s| s.flights.push_back(Ok(FlightResults { itineraries })));
        self
    }

    pub fn fail_flights(&self, reason: &str) -> &Self {
        self.with_state(|s| s.flights.push_back(Err(reason.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Queries of every airport search issued so far, in order
    pub fn airport_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                FakeCall::Airports { query } => Some(query),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: FakeCall) {
        self.with_state(|s| s.calls.push(call));
    }
}

impl TravelApi for FakeTravelApi {
    async fn lookup_nearby(&self, latitude: f64, longitude: f64) -> Result<NearbyAirports> {
        self.record(FakeCall::Nearby {
            latitude,
            longitude,
        });
        let scripted = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.nearby.pop_front()
        };
        match scripted {
            Some(Ok(nearby)) => Ok(nearby),
            Some(Err(reason)) => Err(Error::transport("getNearByAirports", reason)),
            None => Ok(NearbyAirports::default()),
        }
    }

    async fn search_airports(
        &self,
        query: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<AirportRecord>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.record(FakeCall::Airports {
            query: query.to_string(),
        });
        let (delay, scripted) = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (state.airport_delay, state.airports.get(query).cloned())
        };
        if let Some(delay) = delay {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
        match scripted {
            Some(Ok(records)) => Ok(records),
            Some(Err(reason)) => Err(Error::transport("searchAirport", reason)),
            None => Ok(Vec::new()),
        }
    }

    async fn search_flights(&self, criteria: &SearchCriteria) -> Result<FlightResults> {
        self.record(FakeCall::Flights {
            criteria: criteria.clone(),
        });
        let scripted = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.flights.pop_front()
        };
        match scripted {
            Some(Ok(results)) => Ok(results),
            Some(Err(reason)) => Err(Error::transport("searchFlights", reason)),
            None => Ok(FlightResults::default()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// StubServer
// ─────────────────────────────────────────────────────────────────

/// Minimal HTTP/1.1 server on `127.0.0.1` that answers every request with the
/// same status and JSON body, and records the raw request head.
pub struct StubServer {
    port: u16,
    requests: Arc<tokio::sync::Mutex<Vec<String>>>,
    count: Arc<AtomicUsize>,
}

impl StubServer {
    pub async fn respond(status: u16, body: &str) -> Self {
        Self::start(Some((status, body.to_string()))).await
    }

    /// Accepts connections but never answers
    pub async fn hang() -> Self {
        Self::start(None).await
    }

    async fn start(reply: Option<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let port = listener.local_addr().expect("stub server addr").port();
        let requests = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        let count = Arc::new(AtomicUsize::new(0));

        let requests_task = requests.clone();
        let count_task = count.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let requests = requests_task.clone();
                let count = count_task.clone();
                let reply = reply.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    count.fetch_add(1, Ordering::SeqCst);
                    requests
                        .lock()
                        .await
                        .push(String::from_utf8_lossy(&buf).into_owned());

                    match reply {
                        Some((status, body)) => {
                            let response = format!(
                                "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                                status,
                                body.len(),
                                body
                            );
                            let _ = socket.write_all(response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                        None => {
                            // Hold the connection open until the test ends.
                            tokio::time::sleep(Duration::from_secs(3600)).await;
                        }
                    }
                });
            }
        });

        Self {
            port,
            requests,
            count,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn request_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub async fn last_request(&self) -> String {
        self.requests.lock().await.last().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_record_has_identifiers() {
        let record = airport_record("Heathrow", "LHR", "95565050");
        assert_eq!(record.flight_identifiers(), Some(("LHR", "95565050")));
        assert!(bare_record("London").flight_identifiers().is_none());
    }

    #[tokio::test]
    async fn test_fake_records_calls() {
        let api = FakeTravelApi::new();
        api.set_airports("Lon", vec![airport_record("Heathrow", "LHR", "95565050")]);

        let records = api.search_airports("Lon", &CancelToken::new()).await.unwrap();
        let other = api.search_airports("Par", &CancelToken::new()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert!(other.is_empty());
        assert_eq!(api.airport_queries(), vec!["Lon", "Par"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fake_delay_honours_cancel() {
        let api = FakeTravelApi::new();
        api.delay_airports(Duration::from_secs(5));
        let token = CancelToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let err = api.search_airports("Lon", &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_fake_scripted_failures() {
        let api = FakeTravelApi::new();
        api.fail_nearby("offline").fail_flights("502");

        assert!(api.lookup_nearby(1.0, 2.0).await.is_err());
        // Queue drained: next call succeeds empty.
        assert!(api.lookup_nearby(1.0, 2.0).await.unwrap().nearby.is_empty());
        assert_eq!(
            api.calls()[0],
            FakeCall::Nearby {
                latitude: 1.0,
                longitude: 2.0
            }
        );
    }
}
