//! Flight search criteria and itinerary records

use std::fmt;
use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::airport::AirportRef;

/// Decode an explicit `null` the same as a missing field.
///
/// Use together with `#[serde(default)]` on list and string fields of API
/// payloads, which send `null` for empty collections.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fare tier for a flight search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 3] = [CabinClass::Economy, CabinClass::Business, CabinClass::First];

    /// Value sent as the `cabinClass` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First Class",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CabinClass::Economy => CabinClass::Business,
            CabinClass::Business => CabinClass::First,
            CabinClass::First => CabinClass::Economy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CabinClass::Economy => CabinClass::First,
            CabinClass::Business => CabinClass::Economy,
            CabinClass::First => CabinClass::Business,
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the flight search endpoint needs. Built once at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    origin: AirportRef,
    destination: AirportRef,
    date: NaiveDate,
    adults: NonZeroU32,
    cabin_class: CabinClass,
}

impl SearchCriteria {
    pub fn new(
        origin: AirportRef,
        destination: AirportRef,
        date: NaiveDate,
        adults: NonZeroU32,
        cabin_class: CabinClass,
    ) -> Self {
        Self {
            origin,
            destination,
            date,
            adults,
            cabin_class,
        }
    }

    pub fn origin(&self) -> &AirportRef {
        &self.origin
    }

    pub fn destination(&self) -> &AirportRef {
        &self.destination
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// ISO `YYYY-MM-DD` form used on the wire
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn adults(&self) -> NonZeroU32 {
        self.adults
    }

    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }
}

/// Airport or city as shown on a leg/segment
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub raw: Option<f64>,
    #[serde(default)]
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alternate_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub origin: Option<Place>,
    #[serde(default)]
    pub destination: Option<Place>,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub arrival: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub marketing_carrier: Option<Carrier>,
}

impl Segment {
    /// Carrier code plus flight number, e.g. `BA117`
    pub fn flight_code(&self) -> String {
        let carrier = self
            .marketing_carrier
            .as_ref()
            .and_then(|c| c.alternate_id.as_deref())
            .unwrap_or_default();
        format!("{}{}", carrier, self.flight_number.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub origin: Option<Place>,
    #[serde(default)]
    pub destination: Option<Place>,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub arrival: Option<String>,
    #[serde(default)]
    pub duration_in_minutes: Option<u32>,
    #[serde(default)]
    pub stop_count: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<Segment>,
}

/// A single flight search result, consumed only for display
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legs: Vec<Leg>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Itinerary {
    pub fn formatted_price(&self) -> &str {
        self.price
            .as_ref()
            .and_then(|p| p.formatted.as_deref())
            .unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cabin_class_params() {
        assert_eq!(CabinClass::Economy.as_param(), "economy");
        assert_eq!(CabinClass::Business.as_param(), "business");
        assert_eq!(CabinClass::First.as_param(), "first");
        assert_eq!(CabinClass::default(), CabinClass::Economy);
    }

    #[test]
    fn test_cabin_class_cycles() {
        let mut class = CabinClass::Economy;
        for _ in 0..CabinClass::ALL.len() {
            class = class.next();
        }
        assert_eq!(class, CabinClass::Economy);
        assert_eq!(CabinClass::Economy.prev(), CabinClass::First);
    }

    #[test]
    fn test_criteria_date_param_is_iso() {
        let criteria = SearchCriteria::new(
            AirportRef::new("London Heathrow", "LHR", "95565050"),
            AirportRef::new("New York JFK", "JFK", "95565058"),
            NaiveDate::from_ymd_opt(2024, 12, 18).unwrap(),
            NonZeroU32::MIN,
            CabinClass::Economy,
        );
        assert_eq!(criteria.date_param(), "2024-12-18");
        assert_eq!(criteria.adults().get(), 1);
    }

    #[test]
    fn test_itinerary_decodes_sparse_payload() {
        let json = r#"{"id": "id-1", "price": {"formatted": "$500"}, "legs": []}"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.id, "id-1");
        assert_eq!(itinerary.formatted_price(), "$500");
        assert!(itinerary.tags.is_empty());
    }

    #[test]
    fn test_itinerary_full_leg() {
        let json = r#"{
            "id": "13542-2412180830--32573-0-12712-2412181135",
            "price": {"raw": 512.3, "formatted": "$513"},
            "tags": ["cheapest", "shortest"],
            "legs": [{
                "id": "13542-2412180830--32573-0-12712-2412181135",
                "origin": {"name": "London Heathrow", "displayCode": "LHR"},
                "destination": {"name": "New York John F. Kennedy", "displayCode": "JFK"},
                "departure": "2024-12-18T08:30:00",
                "arrival": "2024-12-18T11:35:00",
                "durationInMinutes": 485,
                "stopCount": 0,
                "segments": [{
                    "id": "seg-1",
                    "origin": {"name": "London Heathrow", "displayCode": "LHR"},
                    "destination": {"name": "New York John F. Kennedy", "displayCode": "JFK"},
                    "departure": "2024-12-18T08:30:00",
                    "arrival": "2024-12-18T11:35:00",
                    "flightNumber": "117",
                    "marketingCarrier": {"name": "British Airways", "alternateId": "BA"}
                }]
            }]
        }"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        let leg = &itinerary.legs[0];
        assert_eq!(leg.duration_in_minutes, Some(485));
        assert_eq!(leg.segments[0].flight_code(), "BA117");
        assert_eq!(itinerary.tags, vec!["cheapest", "shortest"]);
    }

    #[test]
    fn test_missing_price_shows_na() {
        assert_eq!(Itinerary::default().formatted_price(), "N/A");
    }
}
