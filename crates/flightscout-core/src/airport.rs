//! Airport records as returned by the travel API, and the validated
//! identity pair the rest of the app works with.

use serde::{Deserialize, Serialize};

/// Display strings for an airport entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub suggestion_title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Identifiers required by the flight search endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightParams {
    #[serde(default)]
    pub sky_id: Option<String>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub flight_place_type: Option<String>,
    #[serde(default)]
    pub localized_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub relevant_flight_params: Option<FlightParams>,
}

/// Raw airport/place record, before identifier validation
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sky_id: Option<String>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub presentation: Option<Presentation>,
    #[serde(default)]
    pub navigation: Option<Navigation>,
    #[serde(default)]
    pub country: Option<String>,
}

impl AirportRecord {
    /// Presentation title, falling back to the bare name
    pub fn display_name(&self) -> &str {
        self.presentation
            .as_ref()
            .and_then(|p| p.title.as_deref())
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Presentation subtitle, falling back to the country
    pub fn subtitle(&self) -> Option<&str> {
        self.presentation
            .as_ref()
            .and_then(|p| p.subtitle.as_deref())
            .or(self.country.as_deref())
    }

    /// `(skyId, entityId)` from `navigation.relevantFlightParams`, if both are
    /// present and non-empty.
    pub fn flight_identifiers(&self) -> Option<(&str, &str)> {
        let params = self.navigation.as_ref()?.relevant_flight_params.as_ref()?;
        let sky_id = params.sky_id.as_deref().filter(|s| !s.is_empty())?;
        let entity_id = params.entity_id.as_deref().filter(|s| !s.is_empty())?;
        Some((sky_id, entity_id))
    }
}

/// Validated airport identity used for flight searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRef {
    name: String,
    sky_id: String,
    entity_id: String,
}

impl AirportRef {
    pub fn new(
        name: impl Into<String>,
        sky_id: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sky_id: sky_id.into(),
            entity_id: entity_id.into(),
        }
    }

    /// Build from a raw record. Records without both flight identifiers are
    /// rejected.
    pub fn from_record(record: &AirportRecord) -> Option<Self> {
        let (sky_id, entity_id) = record.flight_identifiers()?;
        Some(Self::new(record.display_name(), sky_id, entity_id))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sky_id(&self) -> &str {
        &self.sky_id
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn has_identifiers(&self) -> bool {
        !self.sky_id.is_empty() && !self.entity_id.is_empty()
    }
}

/// Keep only records that carry both identifiers, in their original order.
pub fn valid_refs<'a>(records: impl IntoIterator<Item = &'a AirportRecord>) -> Vec<AirportRef> {
    records
        .into_iter()
        .filter_map(AirportRef::from_record)
        .collect()
}
