use crate::models::{Event, Location, Weather};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Cache store backing all three lookups. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn weather_repo(&self) -> repositories::weather::WeatherRepository {
        repositories::weather::WeatherRepository::new(self.conn.clone())
    }

    fn event_repo(&self) -> repositories::event::EventRepository {
        repositories::event::EventRepository::new(self.conn.clone())
    }

    pub async fn find_locations(&self, search_query: &str) -> Result<Vec<Location>> {
        self.location_repo().find_by_query(search_query).await
    }

    pub async fn insert_location(&self, location: &Location) -> Result<i32> {
        self.location_repo().insert(location).await
    }

    pub async fn count_locations(&self, search_query: &str) -> Result<u64> {
        self.location_repo().count_by_query(search_query).await
    }

    pub async fn find_weathers(&self, location_id: i32) -> Result<Vec<Weather>> {
        self.weather_repo().find_by_location(location_id).await
    }

    pub async fn insert_weather(&self, weather: &Weather) -> Result<i32> {
        self.weather_repo().insert(weather).await
    }

    pub async fn insert_weathers(&self, weathers: &[Weather]) -> Result<()> {
        self.weather_repo().insert_all(weathers).await
    }

    pub async fn find_events(&self, location_id: i32) -> Result<Vec<Event>> {
        self.event_repo().find_by_location(location_id).await
    }

    pub async fn insert_event(&self, event: &Event) -> Result<i32> {
        self.event_repo().insert(event).await
    }

    pub async fn insert_events(&self, events: &[Event]) -> Result<()> {
        self.event_repo().insert_all(events).await
    }
}

/// Filesystem path of a file-backed SQLite URL; `None` for in-memory or
/// non-SQLite databases.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.contains(":memory:") {
        return None;
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    fn seattle() -> Location {
        Location {
            search_query: "Seattle".to_string(),
            formatted_query: Some("Seattle, WA".to_string()),
            latitude: Some(47.6),
            longitude: Some(-122.3),
            id: None,
        }
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite:data/city_explorer.db"),
            Some("data/city_explorer.db")
        );
        assert_eq!(
            sqlite_file_path("sqlite://data/cache.db?mode=rwc"),
            Some("data/cache.db")
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/city"), None);
    }

    #[tokio::test]
    async fn test_location_roundtrip() {
        let store = memory_store().await;
        assert!(store.find_locations("Seattle").await.unwrap().is_empty());

        let id = store.insert_location(&seattle()).await.unwrap();
        let rows = store.find_locations("Seattle").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, Some(id));
        assert_eq!(rows[0].formatted_query.as_deref(), Some("Seattle, WA"));
        assert!(store.find_locations("seattle").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_search_queries_are_stored() {
        let store = memory_store().await;

        let first = store.insert_location(&seattle()).await.unwrap();
        let second = store.insert_location(&seattle()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.count_locations("Seattle").await.unwrap(), 2);

        let rows = store.find_locations("Seattle").await.unwrap();
        assert_eq!(rows[0].id, Some(first));
    }

    #[tokio::test]
    async fn test_weather_and_events_scoped_by_location() {
        let store = memory_store().await;
        let seattle_id = store.insert_location(&seattle()).await.unwrap();
        let mut portland = seattle();
        portland.search_query = "Portland".to_string();
        let portland_id = store.insert_location(&portland).await.unwrap();

        for forecast in ["Rain", "Clouds"] {
            store
                .insert_weather(&Weather {
                    forecast: Some(forecast.to_string()),
                    time: Some("Mon Jan 01 2024".to_string()),
                    location_id: seattle_id,
                })
                .await
                .unwrap();
        }

        store
            .insert_event(&Event {
                link: None,
                name: Some("Rose Festival".to_string()),
                host: Some("7".to_string()),
                event_date: None,
                location_id: portland_id,
            })
            .await
            .unwrap();

        let weathers = store.find_weathers(seattle_id).await.unwrap();
        assert_eq!(weathers.len(), 2);
        assert_eq!(weathers[0].forecast.as_deref(), Some("Rain"));
        assert_eq!(weathers[1].forecast.as_deref(), Some("Clouds"));
        assert!(store.find_weathers(portland_id).await.unwrap().is_empty());

        assert!(store.find_events(seattle_id).await.unwrap().is_empty());
        let events = store.find_events(portland_id).await.unwrap();
        assert_eq!(events[0].name.as_deref(), Some("Rose Festival"));
    }

    #[tokio::test]
    async fn test_weather_requires_existing_location() {
        let store = memory_store().await;

        let result = store
            .insert_weather(&Weather {
                forecast: None,
                time: None,
                location_id: 404,
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_batch_insert_is_all_or_nothing() {
        let store = memory_store().await;
        let id = store.insert_location(&seattle()).await.unwrap();

        let day = |forecast: &str| Weather {
            forecast: Some(forecast.to_string()),
            time: None,
            location_id: id,
        };

        store
            .insert_weathers(&[day("Rain"), day("Sun")])
            .await
            .unwrap();
        assert_eq!(store.find_weathers(id).await.unwrap().len(), 2);

        let orphan = Weather {
            location_id: 404,
            ..day("Hail")
        };
        let result = store.insert_weathers(&[day("Fog"), orphan]).await;

        assert!(result.is_err());
        let forecasts: Vec<_> = store
            .find_weathers(id)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|w| w.forecast)
            .collect();
        assert_eq!(forecasts, vec!["Rain", "Sun"]);
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let store = memory_store().await;
        assert!(store.insert_events(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_ping() {
        let store = memory_store().await;
        assert!(store.ping().await.is_ok());
    }
}
