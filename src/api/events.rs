use axum::{
    Json,
    extract::{Query, State},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::validation::location_ref;
use crate::models::Event;

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let location = location_ref(&params)?;
    let events = state.lookup().events(location).await?;
    Ok(Json(events))
}
