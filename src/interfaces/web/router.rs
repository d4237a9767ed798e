use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware,
    middleware::Next,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use super::auth;
use super::handlers::{apps, settings, tokens};
use super::AppState;

/// Port the launcher frontend dev server runs on.
const DEV_WEB_PORT: u16 = 5173;

fn build_localhost_cors(api_port: u16) -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        format!("http://127.0.0.1:{}", api_port),
        format!("http://localhost:{}", api_port),
        format!("http://127.0.0.1:{}", DEV_WEB_PORT),
        format!("http://localhost:{}", DEV_WEB_PORT),
    ]
    .iter()
    .filter_map(|o| o.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
}

pub fn build_api_router(state: AppState) -> Router {
    // Reading the directory is open; every user's launcher polls it.
    let public_routes = Router::new()
        .route("/health", get(health_endpoint))
        .route("/api/apps", get(apps::list_apps))
        .route("/api/settings", get(settings::get_settings))
        .with_state(state.clone());

    // Mutations are admin territory.
    let admin_routes = Router::new()
        .route("/api/apps", post(apps::create_app))
        // Registered before the {id} capture so the literal segment wins.
        .route("/api/apps/reorder", put(apps::reorder_apps))
        .route(
            "/api/apps/{id}",
            put(apps::update_app).delete(apps::delete_app),
        )
        .route("/api/settings", put(settings::put_settings))
        .route(
            "/api/tokens",
            get(tokens::list_tokens).post(tokens::create_token),
        )
        .route("/api/tokens/{id}", axum::routing::delete(tokens::revoke_token))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ))
        .with_state(state.clone());

    public_routes
        .merge(admin_routes)
        .layer(middleware::from_fn(security_headers))
        .layer(build_localhost_cors(state.api_port))
}

async fn health_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "database": "connected" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "status": "error", "message": "Database connection failed" })),
            )
        }
    }
}

async fn security_headers(req: Request<Body>, next: Next) -> axum::response::Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::test_store;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(test_store()),
            api_host: "127.0.0.1".to_string(),
            api_port: 3105,
        }
    }

    #[tokio::test]
    async fn health_reports_ok_on_open_store() {
        let app = build_api_router(test_state());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_carry_security_headers() {
        let app = build_api_router(test_state());
        let req = Request::builder()
            .uri("/api/apps")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
        assert_eq!(resp.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn reorder_path_is_not_swallowed_by_id_capture() {
        let app = build_api_router(test_state());
        let req = Request::builder()
            .method(Method::PUT)
            .uri("/api/apps/reorder")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"order":[]}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        // An empty store accepts an empty order; the {id} handler would 404.
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn method_not_allowed_returns_405() {
        let app = build_api_router(test_state());
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/api/apps")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn api_route_contract_has_all_expected_paths() {
        let paths = [
            "/health",
            "/api/apps",
            "/api/apps/reorder",
            "/api/apps/some_app",
            "/api/settings",
            "/api/tokens",
            "/api/tokens/token_1",
        ];

        assert_eq!(paths.len(), 7, "Expected exactly 7 API routes");
        let unique: HashSet<&str> = paths.iter().copied().collect();
        assert_eq!(unique.len(), 7, "Duplicate routes found in route contract");

        let app = build_api_router(test_state());
        for path in paths {
            // PATCH is bound nowhere, so a known path answers 405 and a
            // missing one 404.
            let req = Request::builder()
                .method(Method::PATCH)
                .uri(path)
                .body(Body::empty())
                .expect("request should build");
            let resp = app
                .clone()
                .oneshot(req)
                .await
                .expect("router oneshot should succeed");
            assert_ne!(
                resp.status(),
                StatusCode::NOT_FOUND,
                "Route missing from router: {}",
                path
            );
        }
    }
}
