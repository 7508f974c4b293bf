use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, get_json, trim_base_url};

pub const PROVIDER: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub summary: Option<String>,
    /// Unix timestamp (seconds) of the start of the forecast day.
    pub time: Option<i64>,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
        }
    }

    /// Fetches the daily forecast for a coordinate pair.
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<DailyForecast>, UpstreamError> {
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            latitude,
            longitude
        );

        let response: ForecastResponse = get_json(&self.client, PROVIDER, &url).await?;

        let days = response.daily.map(|d| d.data).unwrap_or_default();
        if days.is_empty() {
            return Err(UpstreamError::NoData { provider: PROVIDER });
        }

        Ok(days)
    }
}
