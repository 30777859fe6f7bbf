//! flightscout-app - Application state and orchestration for Flight Scout
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management:
//! origin airport selection, the debounced destination autocomplete, the flight
//! search form and configuration loading. Network work runs in spawned tasks that
//! report back through [`Message`]s.

pub mod actions;
pub mod autocomplete;
pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod state;

// Re-export primary types
pub use actions::Services;
pub use autocomplete::{DestinationSearch, DESTINATION_DEBOUNCE};
pub use config::Settings;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use process::process_message;
pub use state::{AppState, FormField, Screen, SearchPhase};
