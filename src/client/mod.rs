//! Client side of the registry contract: a session holds the last fetched
//! snapshot and runs the optimistic-reorder / revert-by-refetch protocol
//! against an abstract transport.

pub mod http;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::icons;
use crate::core::registry::presentation::AppView;

/// Transport seam. The HTTP implementation lives in [`http`]; tests drive
/// the session with an in-memory fake.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    async fn fetch_apps(&self) -> Result<Vec<AppView>>;
    async fn create_app(&self, app: &AppView) -> Result<AppView>;
    async fn update_app(&self, id: &str, patch: &serde_json::Value) -> Result<AppView>;
    async fn delete_app(&self, id: &str) -> Result<()>;
    async fn reorder(&self, order: &[String]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Fetching,
    Ready,
    Mutating,
    Reverting,
}

/// One user's view of the launcher. The snapshot is replaced wholesale on
/// every successful fetch; the optimistic reorder path is the only place a
/// local mutation happens, and it is rolled back by re-fetching when the
/// server declines.
pub struct LauncherSession {
    api: Arc<dyn RegistryApi>,
    state: SessionState,
    snapshot: Vec<AppView>,
    notice: Option<String>,
}

impl LauncherSession {
    pub fn new(api: Arc<dyn RegistryApi>) -> Self {
        Self {
            api,
            state: SessionState::Idle,
            snapshot: Vec::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The full ordered snapshot as last reconciled with the server.
    pub fn snapshot(&self) -> &[AppView] {
        &self.snapshot
    }

    /// Pending user-visible failure notice, cleared on read.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Fetch the authoritative snapshot. A failed load still lands in
    /// `Ready` with an empty list; no failure is fatal to the session.
    pub async fn load(&mut self) {
        self.state = SessionState::Fetching;
        match self.api.fetch_apps().await {
            Ok(apps) => self.snapshot = apps,
            Err(e) => {
                self.snapshot.clear();
                self.notice = Some(format!("Failed to load applications: {}", e));
            }
        }
        self.state = SessionState::Ready;
    }

    /// Drag-reorder: the new order is shown immediately (optimistic), then
    /// offered to the server. On rejection the optimistic order is
    /// discarded and the committed snapshot re-fetched, so the displayed
    /// order always equals something the server actually holds.
    pub async fn reorder(&mut self, order: Vec<String>) {
        let mut by_id: std::collections::HashMap<String, AppView> = self
            .snapshot
            .drain(..)
            .map(|app| (app.id.clone(), app))
            .collect();

        let mut optimistic = Vec::with_capacity(order.len());
        for id in &order {
            match by_id.remove(id) {
                Some(app) => optimistic.push(app),
                None => {
                    // The gesture referenced an id we do not hold; the view
                    // is stale. Reconcile instead of guessing.
                    self.notice = Some("View out of date, reloading".to_string());
                    self.revert().await;
                    return;
                }
            }
        }
        self.snapshot = optimistic;
        self.state = SessionState::Ready;

        if let Err(e) = self.api.reorder(&order).await {
            self.notice = Some(format!("Reorder failed: {}", e));
            self.revert().await;
        }
    }

    pub async fn create(&mut self, app: AppView) {
        self.state = SessionState::Mutating;
        match self.api.create_app(&app).await {
            Ok(_) => self.refetch().await,
            Err(e) => self.notice = Some(format!("Create failed: {}", e)),
        }
        self.state = SessionState::Ready;
    }

    pub async fn update(&mut self, id: &str, patch: serde_json::Value) {
        self.state = SessionState::Mutating;
        match self.api.update_app(id, &patch).await {
            Ok(_) => self.refetch().await,
            Err(e) => self.notice = Some(format!("Update failed: {}", e)),
        }
        self.state = SessionState::Ready;
    }

    pub async fn delete(&mut self, id: &str) {
        self.state = SessionState::Mutating;
        match self.api.delete_app(id).await {
            Ok(()) => self.refetch().await,
            Err(e) => self.notice = Some(format!("Delete failed: {}", e)),
        }
        self.state = SessionState::Ready;
    }

    /// Pure view filter: case-insensitive substring on name or description.
    /// Never touches server state.
    pub fn filtered(&self, query: &str) -> Vec<&AppView> {
        let needle = query.to_lowercase();
        self.snapshot
            .iter()
            .filter(|app| {
                needle.is_empty()
                    || app.name.to_lowercase().contains(&needle)
                    || app.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn icon_for(app: &AppView) -> &'static str {
        icons::resolve(&app.icon_name)
    }

    /// Re-fetch after a successful mutation. Replacing the snapshot beats
    /// patching it locally; drift is not worth the saved round-trip.
    async fn refetch(&mut self) {
        if let Err(e) = self.try_refetch().await {
            self.notice = Some(format!("Refresh failed: {}", e));
        }
    }

    async fn revert(&mut self) {
        self.state = SessionState::Reverting;
        if let Err(e) = self.try_refetch().await {
            // Even the revert fetch failed; an empty list is still a
            // committed server order (the degenerate one).
            self.snapshot.clear();
            self.notice = Some(format!("Failed to reload applications: {}", e));
        }
        self.state = SessionState::Ready;
    }

    async fn try_refetch(&mut self) -> Result<()> {
        self.snapshot = self.api.fetch_apps().await?;
        Ok(())
    }
}
