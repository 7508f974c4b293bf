use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::clients::weather::DailyForecast;
use crate::entities::weathers;

/// One forecast day for a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub location_id: i32,
}

impl Weather {
    #[must_use]
    pub fn from_forecast(location_id: i32, day: &DailyForecast) -> Self {
        Self {
            forecast: day.summary.clone(),
            time: day.time.and_then(format_forecast_day),
            location_id,
        }
    }
}

/// Renders a Unix timestamp as `"Mon Jan 01 2024"` (UTC).
#[must_use]
pub fn format_forecast_day(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%a %b %d %Y").to_string())
}

impl From<weathers::Model> for Weather {
    fn from(model: weathers::Model) -> Self {
        Self {
            forecast: model.forecast,
            time: model.time,
            location_id: model.location_id,
        }
    }
}
