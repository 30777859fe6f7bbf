//! Configuration types for flightscout
//!
//! Defines `Settings` (`config.toml`) and its sections.

use serde::{Deserialize, Serialize};

use flightscout_core::Coordinates;
use flightscout_gateway::{ApiConfig, LocationMode, DEFAULT_IP_LOOKUP_URL};

/// Application settings (`<config_dir>/flightscout/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub location: LocationSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// How the user's position is found for the nearby-airports list
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationSettings {
    #[serde(default)]
    pub mode: LocationMode,

    /// Used when `mode = "fixed"`
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Used when `mode = "fixed"`
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Used when `mode = "ip"`
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            mode: LocationMode::default(),
            latitude: None,
            longitude: None,
            ip_lookup_url: default_ip_lookup_url(),
        }
    }
}

impl LocationSettings {
    /// Configured fixed coordinates, if both halves are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

fn default_ip_lookup_url() -> String {
    DEFAULT_IP_LOOKUP_URL.to_string()
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// How long a notification stays on screen
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            notification_ms: default_notification_ms(),
        }
    }
}

fn default_notification_ms() -> u64 {
    3000
}
