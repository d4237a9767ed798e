use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use super::error_response;
use crate::core::registry::error::RegistryError;

#[derive(serde::Deserialize)]
pub struct CreateTokenRequest {
    pub name: String,
}

pub async fn list_tokens(State(state): State<AppState>) -> Response {
    match state.store.list_admin_tokens().await {
        Ok(tokens) => {
            Json(serde_json::json!({ "success": true, "tokens": tokens })).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

pub async fn create_token(
    State(state): State<AppState>,
    Json(payload): Json<CreateTokenRequest>,
) -> Response {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return error_response(RegistryError::Validation(
            "token name is required".to_string(),
        ))
        .into_response();
    }

    match state.store.create_admin_token(&name).await {
        // The raw token appears in this response only; afterwards only the
        // hash exists.
        Ok((raw_token, record)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "success": true, "token": raw_token, "record": record })),
        )
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

pub async fn revoke_token(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.store.revoke_admin_token(&id).await {
        Ok(true) => Json(serde_json::json!({ "success": true, "message": "Token revoked" }))
            .into_response(),
        Ok(false) => {
            error_response(RegistryError::NotFound(format!("token '{}'", id))).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}
