use std::collections::HashMap;
use std::str::FromStr;

use super::ApiError;
use crate::models::LocationRef;

/// Free-text address of a `/location` request.
pub fn search_query(params: &HashMap<String, String>) -> Result<&str, ApiError> {
    params
        .get("data")
        .map(String::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::missing("data"))
}

/// Location sent back by the front-end as `data[id]`, `data[latitude]` and
/// `data[longitude]` (the dotted `data.id` form is accepted too).
pub fn location_ref(params: &HashMap<String, String>) -> Result<LocationRef, ApiError> {
    Ok(LocationRef {
        id: nested_param(params, "id")?,
        latitude: nested_param(params, "latitude")?,
        longitude: nested_param(params, "longitude")?,
    })
}

fn nested_param<T: FromStr>(params: &HashMap<String, String>, field: &str) -> Result<T, ApiError> {
    let bracketed = format!("data[{field}]");
    let dotted = format!("data.{field}");

    params
        .get(&bracketed)
        .or_else(|| params.get(&dotted))
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| ApiError::missing(bracketed))
}
