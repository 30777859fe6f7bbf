//! `reqwest` implementation of [`TravelApi`]
//!
//! Every call is a single GET against the Sky Scrapper RapidAPI host with the
//! `x-rapidapi-key` / `x-rapidapi-host` headers. There are no retries; a failed
//! call surfaces as one [`Error`] and the caller decides on a fallback.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use flightscout_core::prelude::*;
use flightscout_core::{AirportRecord, SearchCriteria};

use crate::api::{
    decode_envelope, FlightResults, NearbyAirports, TravelApi, NEARBY_AIRPORTS_PATH,
    SEARCH_AIRPORT_PATH, SEARCH_FLIGHTS_PATH,
};
use crate::cancel::CancelToken;

pub const DEFAULT_BASE_URL: &str = "https://sky-scrapper.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "sky-scrapper.p.rapidapi.com";

/// Connection and market settings for the travel API (`[api]` in config.toml)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `x-rapidapi-host` header
    #[serde(default = "default_host")]
    pub host: String,

    /// RapidAPI key. `FLIGHTSCOUT_API_KEY` overrides this.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_locale")]
    pub market: String,

    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Flight result ordering (`best`, `price_high`, `fastest`, ...)
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            host: default_host(),
            api_key: String::new(),
            locale: default_locale(),
            currency: default_currency(),
            market: default_locale(),
            country_code: default_country_code(),
            sort_by: default_sort_by(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_country_code() -> String {
    "US".to_string()
}

fn default_sort_by() -> String {
    "best".to_string()
}

/// HTTP client for the travel API
#[derive(Debug, Clone)]
pub struct HttpTravelApi {
    client: reqwest::Client,
    base_url: Url,
    config: ApiConfig,
}

impl HttpTravelApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid api.base_url {:?}: {}", config.base_url, e)))?;
        if config.api_key.is_empty() {
            warn!("No travel API key configured; requests will be rejected upstream");
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("flightscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint_url(path)?;
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(url)
            .header("x-rapidapi-key", &self.config.api_key)
            .header("x-rapidapi-host", &self.config.host)
            .query(params)
            .send()
            .await
            .map_err(|e| Error::transport(path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} responded with {}", path, status);
            return Err(Error::http_status(path, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(path, e.to_string()))?;

        decode_envelope(path, &body)
    }
}

/// Query parameters for the flight search endpoint
pub fn flight_query_params(criteria: &SearchCriteria, config: &ApiConfig) -> Vec<(&'static str, String)> {
    vec![
        ("originSkyId", criteria.origin().sky_id().to_string()),
        ("destinationSkyId", criteria.destination().sky_id().to_string()),
        ("originEntityId", criteria.origin().entity_id().to_string()),
        (
            "destinationEntityId",
            criteria.destination().entity_id().to_string(),
        ),
        ("date", criteria.date_param()),
        ("cabinClass", criteria.cabin_class().as_param().to_string()),
        ("adults", criteria.adults().to_string()),
        ("sortBy", config.sort_by.clone()),
        ("currency", config.currency.clone()),
        ("market", config.market.clone()),
        ("countryCode", config.country_code.clone()),
    ]
}

impl TravelApi for HttpTravelApi {
    async fn lookup_nearby(&self, latitude: f64, longitude: f64) -> Result<NearbyAirports> {
        let params = [
            ("lat", latitude.to_string()),
            ("lng", longitude.to_string()),
            ("locale", self.config.locale.clone()),
        ];
        self.get_json(NEARBY_AIRPORTS_PATH, &params).await
    }

    async fn search_airports(
        &self,
        query: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<AirportRecord>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let params = [
            ("query", query.to_string()),
            ("locale", self.config.locale.clone()),
        ];
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                trace!("airport search for {:?} cancelled", query);
                Err(Error::Cancelled)
            }
            result = self.get_json(SEARCH_AIRPORT_PATH, &params) => result,
        }
    }

    async fn search_flights(&self, criteria: &SearchCriteria) -> Result<FlightResults> {
        let params = flight_query_params(criteria, &self.config);
        self.get_json(SEARCH_FLIGHTS_PATH, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubServer;
    use chrono::NaiveDate;
    use flightscout_core::{AirportRef, CabinClass};
    use std::num::NonZeroU32;

    fn api_for(server: &StubServer) -> HttpTravelApi {
        HttpTravelApi::new(ApiConfig {
            base_url: server.base_url(),
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn sample_criteria() -> SearchCriteria {
        SearchCriteria::new(
            AirportRef::new("London Heathrow", "LHR", "95565050"),
            AirportRef::new("New York JFK", "JFK", "95565058"),
            NaiveDate::from_ymd_opt(2024, 12, 18).unwrap(),
            NonZeroU32::MIN,
            CabinClass::Economy,
        )
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = HttpTravelApi::new(ApiConfig {
            base_url: "not a url".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_flight_query_params() {
        let params = flight_query_params(&sample_criteria(), &ApiConfig::default());
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("originSkyId"), Some("LHR"));
        assert_eq!(get("destinationSkyId"), Some("JFK"));
        assert_eq!(get("originEntityId"), Some("95565050"));
        assert_eq!(get("destinationEntityId"), Some("95565058"));
        assert_eq!(get("date"), Some("2024-12-18"));
        assert_eq!(get("cabinClass"), Some("economy"));
        assert_eq!(get("adults"), Some("1"));
        assert_eq!(get("sortBy"), Some("best"));
        assert_eq!(get("currency"), Some("USD"));
        assert_eq!(get("market"), Some("en-US"));
        assert_eq!(get("countryCode"), Some("US"));
    }

    #[tokio::test]
    async fn test_search_flights_against_stub() {
        let server = StubServer::respond(
            200,
            r#"{"status": true, "data": {"itineraries": [{"id": "id-1", "price": {"formatted": "$500"}, "legs": []}]}}"#,
        )
        .await;
        let api = api_for(&server);

        let results = api.search_flights(&sample_criteria()).await.unwrap();

        assert_eq!(results.itineraries.len(), 1);
        assert_eq!(results.itineraries[0].id, "id-1");

        let request = server.last_request().await;
        assert!(request.starts_with("GET /api/v2/flights/searchFlights?"));
        assert!(request.contains("originSkyId=LHR"));
        assert!(request.contains("date=2024-12-18"));
        assert!(request.to_lowercase().contains("x-rapidapi-key: test-key"));
        assert!(request
            .to_lowercase()
            .contains("x-rapidapi-host: sky-scrapper.p.rapidapi.com"));
    }

    #[tokio::test]
    async fn test_lookup_nearby_against_stub() {
        let server = StubServer::respond(
            200,
            r#"{"status": true, "data": {"current": {"presentation": {"title": "London"}}, "nearby": [{"name": "Test Airport", "presentation": {"title": "Test Airport"}}], "recent": []}}"#,
        )
        .await;
        let api = api_for(&server);

        let nearby = api.lookup_nearby(51.5074, 0.1278).await.unwrap();

        assert_eq!(nearby.nearby.len(), 1);
        assert_eq!(nearby.nearby[0].display_name(), "Test Airport");
        let request = server.last_request().await;
        assert!(request.starts_with("GET /api/v1/flights/getNearByAirports?"));
        assert!(request.contains("lat=51.5074"));
        assert!(request.contains("lng=0.1278"));
    }

    #[tokio::test]
    async fn test_search_airports_against_stub() {
        let server = StubServer::respond(
            200,
            r#"{"status": true, "data": [{"presentation": {"title": "City Airport"}, "navigation": {"relevantFlightParams": {"skyId": "LHR", "entityId": "95565050"}}}]}"#,
        )
        .await;
        let api = api_for(&server);

        let records = api
            .search_airports("London", &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        let request = server.last_request().await;
        assert!(request.contains("query=London"));
        assert!(request.contains("locale=en-US"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = StubServer::respond(503, r#"{"message": "unavailable"}"#).await;
        let api = api_for(&server);

        let err = api.lookup_nearby(0.0, 0.0).await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
        assert!(!err.is_cancelled());
    }

    #[tokio::test]
    async fn test_search_airports_precancelled_skips_network() {
        let server = StubServer::respond(200, r#"{"status": true, "data": []}"#).await;
        let api = api_for(&server);
        let token = CancelToken::new();
        token.cancel();

        let err = api.search_airports("Lon", &token).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_search_airports_cancelled_mid_flight() {
        let server = StubServer::hang().await;
        let api = api_for(&server);
        let token = CancelToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = api.search_airports("Lon", &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let api = HttpTravelApi::new(ApiConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            ..Default::default()
        })
        .unwrap();

        let err = api
            .search_flights(&sample_criteria())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
