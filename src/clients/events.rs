use reqwest::Client;
use serde::{Deserialize, Deserializer};

use super::{UpstreamError, get_json, trim_base_url};

pub const PROVIDER: &str = "Eventbrite";

#[derive(Debug, Deserialize)]
struct EventSearchResponse {
    #[serde(default)]
    events: EventList,
}

/// Eventbrite has served search results both as a bare array and wrapped in
/// a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventList {
    Items(Vec<EventListing>),
    Page {
        #[serde(default)]
        data: Vec<EventListing>,
    },
}

impl Default for EventList {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl EventList {
    fn into_items(self) -> Vec<EventListing> {
        match self {
            Self::Items(items) | Self::Page { data: items } => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventListing {
    pub url: Option<String>,
    pub name: Option<TextField>,
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub organization_id: Option<String>,
    pub start: Option<EventTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextField {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventTime {
    pub local: Option<String>,
}

impl EventListing {
    #[must_use]
    pub fn name_text(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.text.as_deref())
    }

    #[must_use]
    pub fn start_local(&self) -> Option<&str> {
        self.start.as_ref().and_then(|s| s.local.as_deref())
    }
}

/// Identifiers arrive as strings from the live API but as numbers from some fixtures.
fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Clone)]
pub struct EventsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EventsClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
        }
    }

    /// Searches events around a coordinate pair.
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<EventListing>, UpstreamError> {
        let url = format!(
            "{}/v3/events/search/?token={}&location.latitude={}&location.longitude={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            latitude,
            longitude
        );

        let response: EventSearchResponse = get_json(&self.client, PROVIDER, &url).await?;

        let events = response.events.into_items();
        if events.is_empty() {
            return Err(UpstreamError::NoData { provider: PROVIDER });
        }

        Ok(events)
    }
}
