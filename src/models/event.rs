use serde::{Deserialize, Serialize};

use crate::clients::events::EventListing;
use crate::entities::events;

/// An upcoming event near a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Organizer identifier; the provider does not expose a display name here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    pub location_id: i32,
}

impl Event {
    #[must_use]
    pub fn from_listing(location_id: i32, listing: &EventListing) -> Self {
        Self {
            link: listing.url.clone(),
            name: listing.name_text().map(str::to_string),
            host: listing.organization_id.clone(),
            event_date: listing.start_local().map(str::to_string),
            location_id,
        }
    }
}

impl From<events::Model> for Event {
    fn from(model: events::Model) -> Self {
        Self {
            link: model.link,
            name: model.name,
            host: model.host,
            event_date: model.event_date,
            location_id: model.location_id,
        }
    }
}
