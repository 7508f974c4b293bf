use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub upstream: UpstreamConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Connection string for the cache database (`sqlite:` or `postgres://`).
    pub database_url: String,

    pub log_level: String,

    /// `text` or `json`
    pub log_format: String,

    /// Number of tokio worker threads (0 = number of CPU cores)
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/city_explorer.db".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            worker_threads: 0,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Origins allowed by CORS. `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub geocode_base_url: String,

    pub geocode_api_key: String,

    pub weather_base_url: String,

    pub weather_api_key: String,

    pub events_base_url: String,

    pub events_api_key: String,

    /// Upstream request timeout in seconds. 0 disables the timeout.
    pub request_timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocode_base_url: "https://maps.googleapis.com".to_string(),
            geocode_api_key: String::new(),
            weather_base_url: "https://api.darksky.net".to_string(),
            weather_api_key: String::new(),
            events_base_url: "https://www.eventbriteapi.com".to_string(),
            events_api_key: String::new(),
            request_timeout_seconds: 0,
        }
    }
}

impl UpstreamConfig {
    /// Names of the providers whose API key is not configured.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("GEOCODE_API_KEY", &self.geocode_api_key),
            ("WEATHER_API_KEY", &self.weather_api_key),
            ("EVENTBRITE_API_KEY", &self.events_api_key),
        ]
        .into_iter()
        .filter(|(_, key)| key.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Loads the config file (if any), then applies `.env` and process
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from: {}", path.display());
        }

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overrides fields from environment-style variables looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.general.database_url = url;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.general.log_level = level;
        }
        if let Some(key) = lookup("GEOCODE_API_KEY") {
            self.upstream.geocode_api_key = key;
        }
        if let Some(key) = lookup("WEATHER_API_KEY") {
            self.upstream.weather_api_key = key;
        }
        if let Some(key) = lookup("EVENTBRITE_API_KEY") {
            self.upstream.events_api_key = key;
        }
        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("city-explorer").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".city-explorer").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        for name in self.upstream.missing_keys() {
            warn!("{name} is not set; upstream lookups will be rejected by the provider");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.general.database_url, "sqlite:data/city_explorer.db");
        assert_eq!(config.server.cors_allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.upstream.request_timeout_seconds, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 8080
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.weather_base_url, "https://api.darksky.net");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "4000"),
            ("DATABASE_URL", "postgres://localhost/city"),
            ("GEOCODE_API_KEY", "geo"),
            ("WEATHER_API_KEY", "sky"),
            ("EVENTBRITE_API_KEY", "brite"),
        ]);

        let mut config = Config::default();
        config
            .apply_env(|name| env.get(name).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.general.database_url, "postgres://localhost/city");
        assert_eq!(config.upstream.geocode_api_key, "geo");
        assert_eq!(config.upstream.weather_api_key, "sky");
        assert_eq!(config.upstream.events_api_key, "brite");
        assert!(config.upstream.missing_keys().is_empty());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_env(|name| (name == "PORT").then(|| "abc".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_pool_bounds() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        config.general.max_db_connections = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_keys() {
        let config = Config::default();
        assert_eq!(
            config.upstream.missing_keys(),
            vec!["GEOCODE_API_KEY", "WEATHER_API_KEY", "EVENTBRITE_API_KEY"]
        );
    }
}
