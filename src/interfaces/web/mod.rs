mod auth;
mod handlers;
mod router;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::core::registry::RegistryStore;

pub struct ApiServerConfig {
    pub store: Arc<RegistryStore>,
    pub api_host: String,
    pub api_port: u16,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<RegistryStore>,
    pub(crate) api_host: String,
    pub(crate) api_port: u16,
}

/// Bind and run the HTTP surface. Blocks until the listener fails.
pub async fn serve(config: ApiServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.api_host, config.api_port);
    let state = AppState {
        store: config.store,
        api_host: config.api_host,
        api_port: config.api_port,
    };
    let app = router::build_api_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Registry API running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
