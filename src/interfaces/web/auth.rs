use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::AppState;

/// Gate for admin operations. Reading the directory is open to everyone;
/// anything that mutates the registry passes through here.
///
/// Bootstrap rule: while no admin tokens exist, requests are allowed only
/// when the server listens on loopback. Once a token exists, a valid bearer
/// token is required everywhere.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let any_tokens_exist = state
        .store
        .has_any_admin_tokens()
        .await
        .unwrap_or(false);

    if !any_tokens_exist {
        let is_loopback = state.api_host == "127.0.0.1"
            || state.api_host == "::1"
            || state.api_host == "localhost";
        if is_loopback {
            return next.run(req).await;
        }
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "No admin tokens configured. Create one with `hangar token create` before exposing on a non-loopback address."
            })),
        )
            .into_response();
    }

    let raw_token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let raw_token = match raw_token {
        Some(t) => t,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Missing or invalid Authorization header. Use: Bearer <token>" })),
            )
                .into_response();
        }
    };

    match state.store.validate_admin_token(&raw_token).await {
        Ok(true) => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid or unauthorized admin token" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::test_store;
    use axum::{middleware, response::IntoResponse, routing::post, Router};
    use serde_json::json;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn test_state(api_host: &str, with_token: bool) -> (AppState, Option<String>) {
        let store = Arc::new(test_store());
        let token = if with_token {
            let (raw, _) = store
                .create_admin_token("test-token")
                .await
                .expect("token should be created");
            Some(raw)
        } else {
            None
        };
        (
            AppState {
                store,
                api_host: api_host.to_string(),
                api_port: 3105,
            },
            token,
        )
    }

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route(
                "/api/apps",
                post(|| async { Json(json!({ "ok": true })).into_response() }),
            )
            .layer(middleware::from_fn_with_state(
                state.clone(),
                super::require_admin,
            ))
            .with_state(state)
    }

    async fn request_status(app: Router, headers: Vec<(&str, String)>) -> StatusCode {
        let mut builder = Request::builder().method("POST").uri("/api/apps");
        for (k, v) in headers {
            builder = builder.header(k, v);
        }
        let req = builder.body(Body::empty()).expect("request should build");
        app.oneshot(req)
            .await
            .expect("oneshot should succeed")
            .status()
    }

    #[tokio::test]
    async fn no_tokens_on_loopback_allows_request() {
        let (state, _) = test_state("127.0.0.1", false).await;
        let status = request_status(protected_app(state), vec![]).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn no_tokens_on_non_loopback_rejects_request() {
        let (state, _) = test_state("0.0.0.0", false).await;
        let status = request_status(protected_app(state), vec![]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_present_requires_authorization_header() {
        let (state, _) = test_state("127.0.0.1", true).await;
        let status = request_status(protected_app(state), vec![]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_bearer_token_is_accepted() {
        let (state, token) = test_state("127.0.0.1", true).await;
        let token = token.expect("token should exist");
        let status = request_status(
            protected_app(state),
            vec![("authorization", format!("Bearer {}", token))],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_bearer_token_is_rejected() {
        let (state, _) = test_state("127.0.0.1", true).await;
        let status = request_status(
            protected_app(state),
            vec![("authorization", "Bearer hgr_wrong".to_string())],
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
