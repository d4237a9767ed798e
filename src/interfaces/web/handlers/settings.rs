use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use super::error_response;
use crate::core::registry::error::RegistryError;

/// GET /api/settings — flat key/value map.
pub async fn get_settings(State(state): State<AppState>) -> Response {
    match state.store.all_settings().await {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// PUT /api/settings — same shape back: an object of string values, upserted
/// as one batch.
pub async fn put_settings(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let Some(map) = payload.as_object() else {
        return error_response(RegistryError::Validation(
            "settings body must be an object".to_string(),
        ))
        .into_response();
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value.as_str() {
            Some(v) => entries.push((key.clone(), v.to_string())),
            None => {
                return error_response(RegistryError::Validation(format!(
                    "setting '{}' must be a string",
                    key
                )))
                .into_response();
            }
        }
    }

    match state.store.put_settings(&entries).await {
        Ok(()) => Json(serde_json::json!({ "success": true, "message": "Settings saved" }))
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
