mod apps;
pub mod error;
pub mod presentation;
mod seed;
mod settings;
mod tokens;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::info;

use error::Result;

/// The persistent registry: application records, settings, admin tokens.
/// A single connection behind a mutex gives the single-logical-writer model
/// the reorder contract relies on.
pub struct RegistryStore {
    db: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl RegistryStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    error::RegistryError::Validation(format!(
                        "cannot create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let db = Connection::open(&db_path)?;

        db.execute(
            "CREATE TABLE IF NOT EXISTS apps (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                icon_name TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL,
                type TEXT NOT NULL,
                url TEXT,
                swarm_url TEXT,
                owner TEXT,
                source_url TEXT,
                backend_port TEXT,
                ai_model TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        db.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        db.execute(
            "CREATE TABLE IF NOT EXISTS admin_tokens (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                token_hash TEXT NOT NULL UNIQUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        db.execute(
            "CREATE INDEX IF NOT EXISTS idx_apps_sort_order ON apps(sort_order)",
            [],
        )?;

        info!("Registry store opened at {}", db_path.display());

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Cheap liveness probe used by /health.
    pub async fn health_check(&self) -> Result<()> {
        let db = self.db.lock().await;
        db.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// In-temp-dir store for tests. Avoids touching the real data directory.
#[cfg(test)]
pub fn test_store() -> RegistryStore {
    let dir = std::env::temp_dir().join(format!("hangar-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    RegistryStore::open(dir.join("registry.db")).expect("open test store")
}

#[cfg(test)]
mod tests {
    use super::error::RegistryError;
    use super::types::{AppKind, AppPatch, AppStatus, NewApp};
    use super::*;

    fn new_app(id: &str, order: Option<i64>) -> NewApp {
        NewApp {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: format!("{} tile", id),
            icon_name: "Briefcase".to_string(),
            status: AppStatus::Active,
            kind: AppKind::Url,
            url: Some(format!("https://{}.example.com", id)),
            swarm_url: None,
            owner: None,
            source_url: None,
            backend_port: None,
            ai_model: None,
            sort_order: order,
        }
    }

    // --- CRUD ---

    #[tokio::test]
    async fn create_and_list_returns_records_in_order() {
        let store = test_store();
        store.create_app(new_app("beta", None)).await.unwrap();
        store.create_app(new_app("alpha", None)).await.unwrap();
        let apps = store.list_apps().await.unwrap();
        assert_eq!(apps.len(), 2);
        // Insertion order, not name order: beta got sort_order 0.
        assert_eq!(apps[0].id, "beta");
        assert_eq!(apps[1].id, "alpha");
        assert!(apps[0].sort_order < apps[1].sort_order);
    }

    #[tokio::test]
    async fn create_defaults_sort_order_to_end_of_list() {
        let store = test_store();
        store.create_app(new_app("a", Some(7))).await.unwrap();
        let created = store.create_app(new_app("b", None)).await.unwrap();
        assert_eq!(created.sort_order, 8);
    }

    #[tokio::test]
    async fn create_on_empty_store_starts_at_zero() {
        let store = test_store();
        let created = store.create_app(new_app("solo", None)).await.unwrap();
        assert_eq!(created.sort_order, 0);
    }

    #[tokio::test]
    async fn create_rejects_empty_id_and_name() {
        let store = test_store();
        let mut app = new_app("x", None);
        app.id = "  ".to_string();
        assert!(matches!(
            store.create_app(app).await,
            Err(RegistryError::Validation(_))
        ));
        let mut app = new_app("x", None);
        app.name = String::new();
        assert!(matches!(
            store.create_app(app).await,
            Err(RegistryError::Validation(_))
        ));
        assert!(store.list_apps().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_duplicate_id_is_conflict_and_leaves_original() {
        let store = test_store();
        store.create_app(new_app("dash", None)).await.unwrap();
        let mut dup = new_app("dash", None);
        dup.name = "Impostor".to_string();
        assert!(matches!(
            store.create_app(dup).await,
            Err(RegistryError::Conflict(_))
        ));
        let apps = store.list_apps().await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "DASH");
    }

    #[tokio::test]
    async fn update_patches_fields_without_touching_sort_order() {
        let store = test_store();
        store.create_app(new_app("a", Some(3))).await.unwrap();
        let patch = AppPatch {
            name: Some("Renamed".to_string()),
            status: Some(AppStatus::Maintenance),
            url: Some(None),
            ..Default::default()
        };
        let updated = store.update_app("a", patch).await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, AppStatus::Maintenance);
        assert_eq!(updated.url, None);
        assert_eq!(updated.sort_order, 3);
        // Unpatched fields survive.
        assert_eq!(updated.icon_name, "Briefcase");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = test_store();
        assert!(matches!(
            store.update_app("ghost", AppPatch::default()).await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_record_and_second_delete_is_not_found() {
        let store = test_store();
        store.create_app(new_app("tmp", None)).await.unwrap();
        store.delete_app("tmp").await.unwrap();
        assert!(store.list_apps().await.unwrap().is_empty());
        assert!(matches!(
            store.delete_app("tmp").await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_keeps_sort_order_gaps() {
        let store = test_store();
        for id in ["a", "b", "c"] {
            store.create_app(new_app(id, None)).await.unwrap();
        }
        store.delete_app("b").await.unwrap();
        let apps = store.list_apps().await.unwrap();
        assert_eq!(
            apps.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        // No renumbering: c keeps its original slot.
        assert_eq!(apps[1].sort_order, 2);
    }

    // --- Reorder protocol ---

    #[tokio::test]
    async fn reorder_then_list_returns_exact_sequence() {
        let store = test_store();
        for id in ["a", "b", "c"] {
            store.create_app(new_app(id, None)).await.unwrap();
        }
        store
            .reorder_apps(&["c".into(), "a".into(), "b".into()])
            .await
            .unwrap();
        let apps = store.list_apps().await.unwrap();
        assert_eq!(
            apps.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec!["c", "a", "b"]
        );
        assert!(apps.windows(2).all(|w| w[0].sort_order < w[1].sort_order));
    }

    #[tokio::test]
    async fn reorder_with_missing_id_is_rejected_and_order_unchanged() {
        let store = test_store();
        for id in ["a", "b", "c"] {
            store.create_app(new_app(id, None)).await.unwrap();
        }
        let before: Vec<String> = store
            .list_apps()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert!(matches!(
            store.reorder_apps(&["a".into(), "b".into()]).await,
            Err(RegistryError::Validation(_))
        ));
        let after: Vec<String> = store
            .list_apps()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn reorder_with_unknown_or_duplicate_id_is_rejected() {
        let store = test_store();
        for id in ["a", "b"] {
            store.create_app(new_app(id, None)).await.unwrap();
        }
        assert!(matches!(
            store
                .reorder_apps(&["a".into(), "b".into(), "z".into()])
                .await,
            Err(RegistryError::Validation(_))
        ));
        assert!(matches!(
            store.reorder_apps(&["a".into(), "a".into()]).await,
            Err(RegistryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn reorder_empty_store_accepts_empty_sequence() {
        let store = test_store();
        store.reorder_apps(&[]).await.unwrap();
    }

    // --- Settings ---

    #[tokio::test]
    async fn settings_put_and_read_back() {
        let store = test_store();
        store
            .put_settings(&[
                ("exec_mode".to_string(), "native".to_string()),
                ("theme".to_string(), "dark".to_string()),
            ])
            .await
            .unwrap();
        let all = store.all_settings().await.unwrap();
        assert_eq!(all.get("exec_mode").map(String::as_str), Some("native"));
        assert_eq!(all.get("theme").map(String::as_str), Some("dark"));
    }

    #[tokio::test]
    async fn settings_upsert_overwrites_value() {
        let store = test_store();
        store
            .put_settings(&[("k".to_string(), "v1".to_string())])
            .await
            .unwrap();
        store
            .put_settings(&[("k".to_string(), "v2".to_string())])
            .await
            .unwrap();
        assert_eq!(store.setting("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn setting_missing_key_is_none() {
        let store = test_store();
        assert!(store.setting("nope").await.unwrap().is_none());
    }

    // --- Admin tokens ---

    #[tokio::test]
    async fn token_create_and_validate() {
        let store = test_store();
        let (raw, record) = store.create_admin_token("ops").await.unwrap();
        assert!(raw.starts_with("hgr_"));
        assert_eq!(record.name, "ops");
        assert!(store.validate_admin_token(&raw).await.unwrap());
        assert!(!store.validate_admin_token("hgr_bogus").await.unwrap());
    }

    #[tokio::test]
    async fn token_revoke_removes_token() {
        let store = test_store();
        let (raw, record) = store.create_admin_token("temp").await.unwrap();
        assert!(store.revoke_admin_token(&record.id).await.unwrap());
        assert!(!store.validate_admin_token(&raw).await.unwrap());
        assert!(!store.revoke_admin_token(&record.id).await.unwrap());
    }

    #[tokio::test]
    async fn has_any_tokens_tracks_creation() {
        let store = test_store();
        assert!(!store.has_any_admin_tokens().await.unwrap());
        store.create_admin_token("k").await.unwrap();
        assert!(store.has_any_admin_tokens().await.unwrap());
        assert_eq!(store.list_admin_tokens().await.unwrap().len(), 1);
    }

    // --- Seed ---

    #[tokio::test]
    async fn seed_populates_empty_store_once() {
        let store = test_store();
        let n = store.seed_default_apps().await.unwrap();
        assert!(n > 0);
        let again = store.seed_default_apps().await.unwrap();
        assert_eq!(again, 0);
        let apps = store.list_apps().await.unwrap();
        assert_eq!(apps.len(), n);
        assert!(apps.windows(2).all(|w| w[0].sort_order < w[1].sort_order));
    }

    #[tokio::test]
    async fn health_check_passes_on_open_store() {
        let store = test_store();
        store.health_check().await.unwrap();
    }
}
