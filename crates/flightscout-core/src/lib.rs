//! # flightscout-core - Core Domain Types
//!
//! Foundation crate for flightscout. Provides the travel-data domain types,
//! error handling, notifications, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Airports (`airport`)
//! - [`AirportRecord`] - Raw airport/place record as returned by the API
//! - [`AirportRef`] - Validated `(skyId, entityId)` pair plus display name
//! - [`valid_refs()`] - Filter raw records down to usable references
//!
//! ### Flights (`flight`)
//! - [`SearchCriteria`] - Immutable flight search request
//! - [`CabinClass`] - Economy / Business / First
//! - [`Itinerary`] - Display-only flight result (legs, segments, price)
//!
//! ### Notifications (`notification`)
//! - [`Notification`], [`Severity`] - One-shot user-facing messages
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum grouped by layer, with `is_cancelled()`
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use flightscout_core::prelude::*;
//! ```

pub mod airport;
pub mod error;
pub mod flight;
pub mod location;
pub mod logging;
pub mod notification;
pub mod prelude;

pub use airport::{valid_refs, AirportRecord, AirportRef, FlightParams, Navigation, Presentation};
pub use error::{Error, Result};
pub use flight::{
    null_as_default, CabinClass, Carrier, Itinerary, Leg, Place, Price, SearchCriteria, Segment,
};
pub use location::Coordinates;
pub use notification::{Notification, Severity};
