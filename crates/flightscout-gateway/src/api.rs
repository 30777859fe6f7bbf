//! Travel API surface shared by the HTTP client and test fakes

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use flightscout_core::prelude::*;
use flightscout_core::{null_as_default, AirportRecord, Itinerary, SearchCriteria};

use crate::cancel::CancelToken;

pub const NEARBY_AIRPORTS_PATH: &str = "/api/v1/flights/getNearByAirports";
pub const SEARCH_AIRPORT_PATH: &str = "/api/v1/flights/searchAirport";
pub const SEARCH_FLIGHTS_PATH: &str = "/api/v2/flights/searchFlights";

/// Payload of the nearby-airports endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyAirports {
    #[serde(default)]
    pub current: Option<AirportRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nearby: Vec<AirportRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent: Vec<AirportRecord>,
}

/// Payload of the flight search endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub itineraries: Vec<Itinerary>,
}

/// Remote travel-data operations
#[trait_variant::make(TravelApi: Send)]
pub trait LocalTravelApi {
    /// Airports near a coordinate
    async fn lookup_nearby(&self, latitude: f64, longitude: f64) -> Result<NearbyAirports>;

    /// Free-text airport/place search. Returns [`Error::Cancelled`] once
    /// `cancel` fires, regardless of what the network does afterwards.
    async fn search_airports(
        &self,
        query: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<AirportRecord>>;

    /// One-way flight search
    async fn search_flights(&self, criteria: &SearchCriteria) -> Result<FlightResults>;
}

/// Response wrapper used by every endpoint: `{ status, message, data }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    message: Option<serde_json::Value>,
    data: Option<T>,
}

/// Decode an endpoint body, unwrapping the envelope.
///
/// `status: false` is an API error. A missing or null `data` decodes to the
/// payload's default (empty list / empty results).
pub fn decode_envelope<T>(endpoint: &str, body: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| Error::decode(endpoint, e.to_string()))?;

    if envelope.status == Some(false) {
        let message = match envelope.message {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => format!("{endpoint} reported failure"),
        };
        return Err(Error::api(message));
    }

    Ok(envelope.data.unwrap_or_default())
}
