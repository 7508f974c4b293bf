use axum::{
    Json,
    extract::{Query, State},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::validation::search_query;
use crate::models::Location;

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Location>, ApiError> {
    let query = search_query(&params)?;
    let location = state.lookup().location(query).await?;
    Ok(Json(location))
}
