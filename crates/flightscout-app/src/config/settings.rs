//! Settings loading
//!
//! `config.toml` lives in the platform config directory
//! (`~/.config/flightscout/` on Linux). A missing or unreadable file is not an
//! error: defaults are used and the problem is logged.

use std::path::{Path, PathBuf};

use flightscout_core::prelude::*;
use flightscout_core::Coordinates;
use flightscout_gateway::LocationMode;

use super::types::Settings;

const CONFIG_DIR: &str = "flightscout";
const CONFIG_FILENAME: &str = "config.toml";

/// Overrides `api.api_key`
pub const API_KEY_ENV: &str = "FLIGHTSCOUT_API_KEY";

/// Default location of `config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`, falling back to defaults
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply environment overrides (`FLIGHTSCOUT_API_KEY`)
pub fn apply_env_overrides(settings: &mut Settings) {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            debug!("Using API key from {}", API_KEY_ENV);
            settings.api.api_key = key.trim().to_string();
        }
        _ => {}
    }
}

/// Force a fixed location (`--lat` / `--lng`)
pub fn apply_fixed_location(settings: &mut Settings, coordinates: Coordinates) {
    settings.location.mode = LocationMode::Fixed;
    settings.location.latitude = Some(coordinates.latitude);
    settings.location.longitude = Some(coordinates.longitude);
}

const DEFAULT_CONFIG: &str = r#"# flightscout configuration

[api]
# RapidAPI key for the Sky Scrapper API. FLIGHTSCOUT_API_KEY overrides this.
api_key = ""
base_url = "https://sky-scrapper.p.rapidapi.com"
host = "sky-scrapper.p.rapidapi.com"
locale = "en-US"
currency = "USD"
market = "en-US"
country_code = "US"
sort_by = "best"

[location]
# "ip" (approximate, from your public IP), "fixed" (latitude/longitude below)
# or "off" (never look up nearby airports)
mode = "ip"
# latitude = 51.47
# longitude = -0.45
ip_lookup_url = "https://ipapi.co/json/"

[ui]
# How long notifications stay on screen, in milliseconds
notification_ms = 3000
"#;

/// Write a commented default `config.toml` at `config_path` unless one
/// already exists. Returns true if a file was written.
pub fn init_config_file(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        info!("Config file already exists at {:?}", config_path);
        return Ok(false);
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", config_path, e)))?;

    info!("Created default config at {:?}", config_path);
    Ok(true)
}
