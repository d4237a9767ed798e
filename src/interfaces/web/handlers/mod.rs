pub mod apps;
pub mod settings;
pub mod tokens;

use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::core::registry::error::RegistryError;

/// Map a registry failure onto its HTTP outcome. Validation, conflict and
/// not-found are surfaced as the specific status; storage detail is logged
/// and replaced by a generic message.
pub(crate) fn error_response(err: RegistryError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        RegistryError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "success": false, "error": msg })),
        ),
        RegistryError::Conflict(msg) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "success": false, "error": msg })),
        ),
        RegistryError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "success": false, "error": msg })),
        ),
        RegistryError::Storage(e) => {
            error!("Storage failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "success": false, "error": "Internal server error" })),
            )
        }
    }
}
