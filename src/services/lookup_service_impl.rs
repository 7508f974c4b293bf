//! `SeaORM` implementation of the `LookupService` trait.

use crate::clients::events::EventsClient;
use crate::clients::geocode::{self, GeocodeClient};
use crate::clients::weather::WeatherClient;
use crate::db::Store;
use crate::models::{Event, Location, LocationRef, Weather};
use crate::services::lookup_service::{LookupError, LookupService};
use std::sync::Arc;
use tracing::{debug, info};

/// [`LookupService`] backed by the [`Store`] and the three upstream clients.
///
/// Lookup and insert are not wrapped in a transaction: two concurrent misses
/// for the same key both fetch upstream and both insert. Each fetched batch is
/// stored in one transaction, so a cache hit never sees a partial batch.
pub struct SeaOrmLookupService {
    store: Store,
    geocode: Arc<GeocodeClient>,
    weather: Arc<WeatherClient>,
    events: Arc<EventsClient>,
}

impl SeaOrmLookupService {
    #[must_use]
    pub const fn new(
        store: Store,
        geocode: Arc<GeocodeClient>,
        weather: Arc<WeatherClient>,
        events: Arc<EventsClient>,
    ) -> Self {
        Self {
            store,
            geocode,
            weather,
            events,
        }
    }
}

fn record_lookup(kind: &'static str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("cache_lookups_total", "kind" => kind, "result" => result).increment(1);
}

#[async_trait::async_trait]
impl LookupService for SeaOrmLookupService {
    async fn location(&self, search_query: &str) -> Result<Location, LookupError> {
        let cached = self.store.find_locations(search_query).await?;
        if let Some(location) = cached.into_iter().next() {
            record_lookup("location", true);
            debug!(search_query, "Location served from cache");
            return Ok(location);
        }
        record_lookup("location", false);

        let results = self.geocode.fetch(search_query).await?;
        let first = results.first().ok_or(LookupError::NoData {
            provider: geocode::PROVIDER,
        })?;

        let location = Location::from_geocode(search_query, first);
        let id = self.store.insert_location(&location).await?;

        info!(search_query, id, "Cached new location");
        Ok(location.with_id(id))
    }

    async fn weather(&self, location: LocationRef) -> Result<Vec<Weather>, LookupError> {
        let cached = self.store.find_weathers(location.id).await?;
        if !cached.is_empty() {
            record_lookup("weather", true);
            debug!(location_id = location.id, "Weather served from cache");
            return Ok(cached);
        }
        record_lookup("weather", false);

        let days = self
            .weather
            .fetch(location.latitude, location.longitude)
            .await?;

        let summaries: Vec<Weather> = days
            .iter()
            .map(|day| Weather::from_forecast(location.id, day))
            .collect();

        self.store.insert_weathers(&summaries).await?;

        info!(
            location_id = location.id,
            count = summaries.len(),
            "Cached weather forecasts"
        );
        Ok(summaries)
    }

    async fn events(&self, location: LocationRef) -> Result<Vec<Event>, LookupError> {
        let cached = self.store.find_events(location.id).await?;
        if !cached.is_empty() {
            record_lookup("events", true);
            debug!(location_id = location.id, "Events served from cache");
            return Ok(cached);
        }
        record_lookup("events", false);

        let listings = self
            .events
            .fetch(location.latitude, location.longitude)
            .await?;

        let summaries: Vec<Event> = listings
            .iter()
            .map(|listing| Event::from_listing(location.id, listing))
            .collect();

        self.store.insert_events(&summaries).await?;

        info!(
            location_id = location.id,
            count = summaries.len(),
            "Cached events"
        );
        Ok(summaries)
    }
}
