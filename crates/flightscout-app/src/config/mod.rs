//! Configuration file parsing for flightscout
//!
//! - `config.toml` - API credentials, location source, UI timing
//! - `FLIGHTSCOUT_API_KEY` - overrides the configured API key

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, apply_fixed_location, default_config_path, init_config_file,
    load_settings, API_KEY_ENV,
};
pub use types::*;
