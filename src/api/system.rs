use axum::{extract::State, response::Html};
use std::sync::Arc;

use super::{ApiError, AppState};

pub async fn testing() -> Html<&'static str> {
    Html("<h1>HELLO WORLD..</h1>")
}

pub async fn health(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
    Ok("ok")
}
