use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamError, get_json, trim_base_url};

pub const PROVIDER: &str = "Google Geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl GeocodeResult {
    fn lat_lng(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }

    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.lat_lng().and_then(|l| l.lat)
    }

    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.lat_lng().and_then(|l| l.lng)
    }
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
        }
    }

    /// Geocodes a free-text address. Fails with [`UpstreamError::NoData`] when
    /// the provider finds nothing.
    pub async fn fetch(&self, address: &str) -> Result<Vec<GeocodeResult>, UpstreamError> {
        let url = format!(
            "{}/maps/api/geocode/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key)
        );

        let response: GeocodeResponse = get_json(&self.client, PROVIDER, &url).await?;

        if response.results.is_empty() {
            return Err(UpstreamError::NoData { provider: PROVIDER });
        }

        Ok(response.results)
    }
}
