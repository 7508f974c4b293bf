use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;
use crate::entities::locations;

/// A geocoded search, cached under its `search_query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub search_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl Location {
    /// Normalizes one geocoding result. The record has no `id` until stored.
    #[must_use]
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address.clone(),
            latitude: result.latitude(),
            longitude: result.longitude(),
            id: None,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<locations::Model> for Location {
    fn from(model: locations::Model) -> Self {
        Self {
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
            id: Some(model.id),
        }
    }
}

/// The identity and coordinates of a stored location, as sent back by the
/// front-end for weather and event lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRef {
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seattle() -> GeocodeResult {
        serde_json::from_value(serde_json::json!({
            "formatted_address": "Seattle, WA",
            "geometry": { "location": { "lat": 47.6, "lng": -122.3 } }
        }))
        .unwrap()
    }

    #[test]
    fn test_from_geocode() {
        let location = Location::from_geocode("Seattle", &seattle());
        assert_eq!(location.search_query, "Seattle");
        assert_eq!(location.formatted_query.as_deref(), Some("Seattle, WA"));
        assert_eq!(location.latitude, Some(47.6));
        assert_eq!(location.longitude, Some(-122.3));
        assert_eq!(location.id, None);
    }

    #[test]
    fn test_serialized_shape() {
        let location = Location::from_geocode("Seattle", &seattle()).with_id(7);
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "search_query": "Seattle",
                "formatted_query": "Seattle, WA",
                "latitude": 47.6,
                "longitude": -122.3,
                "id": 7
            })
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let result: GeocodeResult = serde_json::from_value(serde_json::json!({})).unwrap();
        let location = Location::from_geocode("Atlantis", &result);
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json, serde_json::json!({ "search_query": "Atlantis" }));
    }
}
