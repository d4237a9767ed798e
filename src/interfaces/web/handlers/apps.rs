use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::AppState;
use super::error_response;
use crate::core::registry::error::RegistryError;
use crate::core::registry::presentation::{AppPatchView, AppView, NewAppView};

/// GET /api/apps — the full ordered snapshot clients render from.
pub async fn list_apps(State(state): State<AppState>) -> Response {
    match state.store.list_apps().await {
        Ok(apps) => {
            let views: Vec<AppView> = apps.into_iter().map(AppView::from).collect();
            Json(views).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

/// POST /api/apps. The body is decoded by hand so a malformed shape comes
/// back as 400, not an extractor rejection.
pub async fn create_app(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let body: NewAppView = match serde_json::from_value(payload) {
        Ok(body) => body,
        Err(e) => {
            return error_response(RegistryError::Validation(format!("invalid app body: {}", e)))
                .into_response();
        }
    };

    if !body.icon_name.is_empty() && !crate::core::icons::is_known(&body.icon_name) {
        tracing::warn!(
            "App '{}' references unknown icon '{}', clients will render the fallback glyph",
            body.id,
            body.icon_name
        );
    }

    match state.store.create_app(body.into()).await {
        Ok(record) => (StatusCode::CREATED, Json(AppView::from(record))).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// PUT /api/apps/{id} — partial update, sort order excluded by contract.
pub async fn update_app(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let patch: AppPatchView = match serde_json::from_value(payload) {
        Ok(patch) => patch,
        Err(e) => {
            return error_response(RegistryError::Validation(format!(
                "invalid patch body: {}",
                e
            )))
            .into_response();
        }
    };

    match state.store.update_app(&id, patch.into()).await {
        Ok(record) => Json(AppView::from(record)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// DELETE /api/apps/{id}.
pub async fn delete_app(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.store.delete_app(&id).await {
        Ok(()) => Json(serde_json::json!({ "success": true, "message": "App deleted" }))
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// PUT /api/apps/reorder with body `{ "order": [id, ...] }`. The sequence
/// must match the known id set exactly; the store applies it atomically.
pub async fn reorder_apps(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let Some(order) = payload.get("order").and_then(|v| v.as_array()) else {
        return error_response(RegistryError::Validation(
            "order must be an array of ids".to_string(),
        ))
        .into_response();
    };

    let mut ids = Vec::with_capacity(order.len());
    for value in order {
        match value.as_str() {
            Some(id) => ids.push(id.to_string()),
            None => {
                return error_response(RegistryError::Validation(
                    "order must contain string ids".to_string(),
                ))
                .into_response();
            }
        }
    }

    match state.store.reorder_apps(&ids).await {
        Ok(()) => Json(serde_json::json!({ "success": true, "message": "Order updated" }))
            .into_response(),
        Err(e) => error_response(e).into_response(),
    }
}
