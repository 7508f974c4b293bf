//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use city_explorer::api::AppState;
use city_explorer::config::Config;
use city_explorer::models::Location;
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

pub const GEOCODE_KEY: &str = "test-geocode-key";
pub const WEATHER_KEY: &str = "test-weather-key";
pub const EVENTS_KEY: &str = "test-events-key";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub upstream: MockServer,
    _db: TempDatabase,
}

/// Removes the test database file (and SQLite's sidecar files) on drop.
struct TempDatabase(PathBuf);

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut path = self.0.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Builds the app against a fresh file-backed SQLite database and a mock
/// server standing in for all three providers.
pub async fn spawn_app() -> TestApp {
    let upstream = MockServer::start().await;

    let db_path = std::env::temp_dir().join(format!(
        "city-explorer-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}", db_path.display());
    config.upstream.geocode_base_url = upstream.uri();
    config.upstream.geocode_api_key = GEOCODE_KEY.to_string();
    config.upstream.weather_base_url = upstream.uri();
    config.upstream.weather_api_key = WEATHER_KEY.to_string();
    config.upstream.events_base_url = upstream.uri();
    config.upstream.events_api_key = EVENTS_KEY.to_string();

    let state = city_explorer::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: city_explorer::api::router(state.clone()),
        state,
        upstream,
        _db: TempDatabase(db_path),
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// Stores a location directly, bypassing the geocoder.
    pub async fn seed_location(&self, search_query: &str, lat: f64, lng: f64) -> i32 {
        self.state
            .store()
            .insert_location(&Location {
                search_query: search_query.to_string(),
                formatted_query: Some(format!("{search_query}, USA")),
                latitude: Some(lat),
                longitude: Some(lng),
                id: None,
            })
            .await
            .expect("Failed to seed location")
    }
}

/// Query string for the weather and events endpoints, with the brackets
/// percent-encoded the way browsers send them.
pub fn location_params(id: i32, lat: f64, lng: f64) -> String {
    format!("data%5Bid%5D={id}&data%5Blatitude%5D={lat}&data%5Blongitude%5D={lng}")
}
