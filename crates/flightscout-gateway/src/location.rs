//! Resolving the user's position
//!
//! A terminal has no browser geolocation prompt, so the position comes from
//! configuration, from an IP geolocation endpoint, or not at all. A disabled
//! locator behaves like a denied permission: it always fails.

use serde::{Deserialize, Serialize};

use flightscout_core::prelude::*;
use flightscout_core::Coordinates;

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Where the user's position comes from (`[location] mode`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Look up the public IP's approximate position
    #[default]
    Ip,
    /// Use the configured latitude/longitude
    Fixed,
    /// Never resolve a position
    Off,
}

#[trait_variant::make(Locator: Send)]
pub trait LocalLocator {
    async fn locate(&self) -> Result<Coordinates>;
}

/// Always returns the same coordinates
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(Error::geolocation(format!(
                "configured coordinates out of range: {}, {}",
                self.0.latitude, self.0.longitude
            )))
        }
    }
}

/// Response shape shared by ipapi.co-style services
#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Approximate position from the caller's public IP
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

impl IpLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::geolocation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::geolocation(format!(
                "lookup returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let body: IpLocation = response
            .json()
            .await
            .map_err(|e| Error::geolocation(format!("unreadable lookup response: {}", e)))?;

        if body.error {
            return Err(Error::geolocation(
                body.reason.unwrap_or_else(|| "lookup refused".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lng)) => {
                let coords = Coordinates::new(lat, lng);
                debug!("IP location resolved to {}, {}", lat, lng);
                Ok(coords)
            }
            _ => Err(Error::geolocation("lookup response had no coordinates")),
        }
    }
}

/// Locator selected from configuration
#[derive(Debug, Clone)]
pub enum SystemLocator {
    Fixed(FixedLocator),
    Ip(IpLocator),
    Disabled,
}

impl SystemLocator {
    pub fn from_mode(mode: LocationMode, fixed: Option<Coordinates>, ip_lookup_url: &str) -> Self {
        match (mode, fixed) {
            (LocationMode::Fixed, Some(coords)) => SystemLocator::Fixed(FixedLocator(coords)),
            (LocationMode::Fixed, None) => {
                warn!("location.mode = \"fixed\" without latitude/longitude; location disabled");
                SystemLocator::Disabled
            }
            (LocationMode::Ip, _) => SystemLocator::Ip(IpLocator::new(ip_lookup_url)),
            (LocationMode::Off, _) => SystemLocator::Disabled,
        }
    }
}

impl Locator for SystemLocator {
    async fn locate(&self) -> Result<Coordinates> {
        match self {
            SystemLocator::Fixed(locator) => Locator::locate(locator).await,
            SystemLocator::Ip(locator) => Locator::locate(locator).await,
            SystemLocator::Disabled => Err(Error::geolocation("location access is disabled")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubServer;

    #[tokio::test]
    async fn test_fixed_locator() {
        let coords = Coordinates::new(51.5074, 0.1278);
        assert_eq!(Locator::locate(&FixedLocator(coords)).await.unwrap(), coords);
    }

    #[tokio::test]
    async fn test_fixed_locator_rejects_out_of_range() {
        let err = Locator::locate(&FixedLocator(Coordinates::new(200.0, 0.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Geolocation { .. }));
    }

    #[tokio::test]
    async fn test_disabled_locator_fails() {
        let err = Locator::locate(&SystemLocator::Disabled).await.unwrap_err();
        assert!(matches!(err, Error::Geolocation { .. }));
    }

    #[tokio::test]
    async fn test_system_locator_delegates() {
        let coords = Coordinates::new(40.64, -73.78);
        let fixed = SystemLocator::from_mode(LocationMode::Fixed, Some(coords), DEFAULT_IP_LOOKUP_URL);
        assert_eq!(Locator::locate(&fixed).await.unwrap(), coords);

        let server = StubServer::respond(200, r#"{"latitude": 48.85, "longitude": 2.35}"#).await;
        let ip = SystemLocator::from_mode(LocationMode::Ip, None, &server.base_url());
        assert_eq!(
            Locator::locate(&ip).await.unwrap(),
            Coordinates::new(48.85, 2.35)
        );
    }

    #[test]
    fn test_from_mode() {
        let coords = Some(Coordinates::new(1.0, 2.0));
        assert!(matches!(
            SystemLocator::from_mode(LocationMode::Fixed, coords, DEFAULT_IP_LOOKUP_URL),
            SystemLocator::Fixed(_)
        ));
        assert!(matches!(
            SystemLocator::from_mode(LocationMode::Fixed, None, DEFAULT_IP_LOOKUP_URL),
            SystemLocator::Disabled
        ));
        assert!(matches!(
            SystemLocator::from_mode(LocationMode::Ip, None, DEFAULT_IP_LOOKUP_URL),
            SystemLocator::Ip(_)
        ));
        assert!(matches!(
            SystemLocator::from_mode(LocationMode::Off, coords, DEFAULT_IP_LOOKUP_URL),
            SystemLocator::Disabled
        ));
    }

    #[tokio::test]
    async fn test_ip_locator_parses_response() {
        let server =
            StubServer::respond(200, r#"{"ip": "203.0.113.7", "latitude": 51.5, "longitude": -0.12}"#)
                .await;
        let locator = IpLocator::new(server.base_url());
        let coords = Locator::locate(&locator).await.unwrap();
        assert_eq!(coords, Coordinates::new(51.5, -0.12));
    }

    #[tokio::test]
    async fn test_ip_locator_error_body() {
        let server =
            StubServer::respond(200, r#"{"error": true, "reason": "RateLimited"}"#).await;
        let locator = IpLocator::new(server.base_url());
        let err = Locator::locate(&locator).await.unwrap_err();
        assert!(err.to_string().contains("RateLimited"));
    }
}
