//! # flightscout-gateway - Travel API and Location Clients
//!
//! Talks to the outside world: the Sky Scrapper travel API over HTTP and the
//! user's approximate position.
//!
//! Depends on [`flightscout_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Travel API
//! - [`TravelApi`] - Nearby airports, airport search, flight search
//! - [`HttpTravelApi`] - `reqwest` implementation
//! - [`ApiConfig`] - Base URL, RapidAPI credentials, market settings
//! - [`decode_envelope()`] - Unwrap the `{ status, message, data }` response wrapper
//!
//! ### Cancellation
//! - [`CancelToken`] - Clonable cancel flag for in-flight lookups
//!
//! ### Location
//! - [`Locator`] - Resolve the user's coordinates
//! - [`SystemLocator`] - Fixed / IP lookup / disabled, chosen from config
//! - [`LocationMode`] - `[location] mode` setting

pub mod api;
pub mod cancel;
pub mod http;
pub mod location;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use api::{decode_envelope, FlightResults, NearbyAirports, TravelApi};
pub use cancel::CancelToken;
pub use http::{flight_query_params, ApiConfig, HttpTravelApi, DEFAULT_API_HOST, DEFAULT_BASE_URL};
pub use location::{
    FixedLocator, IpLocator, LocationMode, Locator, SystemLocator, DEFAULT_IP_LOOKUP_URL,
};
