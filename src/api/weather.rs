use axum::{
    Json,
    extract::{Query, State},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::validation::location_ref;
use crate::models::Weather;

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Weather>>, ApiError> {
    let location = location_ref(&params)?;
    let forecasts = state.lookup().weather(location).await?;
    Ok(Json(forecasts))
}
