use std::sync::Arc;
use std::time::Duration;

use crate::clients::events::EventsClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::weather::WeatherClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{LookupService, SeaOrmLookupService};

/// Build the HTTP client shared by all upstream clients so they reuse one
/// connection pool.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("city-explorer/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10);

    if timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_seconds));
    }

    builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub lookup: Arc<dyn LookupService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires the upstream clients and lookup service around an existing store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let upstream = &config.upstream;
        let http = build_shared_http_client(upstream.request_timeout_seconds)?;

        let geocode = Arc::new(GeocodeClient::new(
            http.clone(),
            upstream.geocode_base_url.clone(),
            upstream.geocode_api_key.clone(),
        ));
        let weather = Arc::new(WeatherClient::new(
            http.clone(),
            upstream.weather_base_url.clone(),
            upstream.weather_api_key.clone(),
        ));
        let events = Arc::new(EventsClient::new(
            http,
            upstream.events_base_url.clone(),
            upstream.events_api_key.clone(),
        ));

        let lookup: Arc<dyn LookupService> = Arc::new(SeaOrmLookupService::new(
            store.clone(),
            geocode,
            weather,
            events,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            lookup,
        })
    }
}
