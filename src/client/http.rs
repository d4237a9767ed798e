//! reqwest-backed transport for [`RegistryApi`], speaking the JSON surface
//! the web interface exposes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};

use super::RegistryApi;
use crate::core::registry::presentation::AppView;

pub struct HttpRegistryApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpRegistryApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

/// Pull the server's error message out of a failed response, falling back
/// to the status code when the body is not the expected shape.
async fn reject(response: reqwest::Response, action: &str) -> anyhow::Error {
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(String::from));
    match message {
        Some(msg) => anyhow::anyhow!("{} failed: {}", action, msg),
        None => anyhow::anyhow!("{} failed with status {}", action, status),
    }
}

#[async_trait]
impl RegistryApi for HttpRegistryApi {
    async fn fetch_apps(&self) -> Result<Vec<AppView>> {
        let response = self
            .request(Method::GET, "/api/apps")
            .send()
            .await
            .context("registry unreachable")?;
        if !response.status().is_success() {
            return Err(reject(response, "fetch").await);
        }
        response
            .json::<Vec<AppView>>()
            .await
            .context("malformed app list from registry")
    }

    async fn create_app(&self, app: &AppView) -> Result<AppView> {
        let response = self
            .request(Method::POST, "/api/apps")
            .json(app)
            .send()
            .await
            .context("registry unreachable")?;
        if response.status() != StatusCode::CREATED {
            return Err(reject(response, "create").await);
        }
        response
            .json::<AppView>()
            .await
            .context("malformed app record from registry")
    }

    async fn update_app(&self, id: &str, patch: &serde_json::Value) -> Result<AppView> {
        let response = self
            .request(Method::PUT, &format!("/api/apps/{}", id))
            .json(patch)
            .send()
            .await
            .context("registry unreachable")?;
        if !response.status().is_success() {
            return Err(reject(response, "update").await);
        }
        response
            .json::<AppView>()
            .await
            .context("malformed app record from registry")
    }

    async fn delete_app(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/apps/{}", id))
            .send()
            .await
            .context("registry unreachable")?;
        if !response.status().is_success() {
            return Err(reject(response, "delete").await);
        }
        Ok(())
    }

    async fn reorder(&self, order: &[String]) -> Result<()> {
        let response = self
            .request(Method::PUT, "/api/apps/reorder")
            .json(&serde_json::json!({ "order": order }))
            .send()
            .await
            .context("registry unreachable")?;
        if !response.status().is_success() {
            return Err(reject(response, "reorder").await);
        }
        Ok(())
    }
}
