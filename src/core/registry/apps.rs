use rusqlite::{params, OptionalExtension, Row};

use super::error::{RegistryError, Result};
use super::types::{AppPatch, AppRecord, NewApp};
use super::RegistryStore;

const APP_COLUMNS: &str = "id, name, description, icon_name, status, type, url, swarm_url, \
     owner, source_url, backend_port, ai_model, sort_order";

fn row_to_app(row: &Row<'_>) -> rusqlite::Result<AppRecord> {
    Ok(AppRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon_name: row.get(3)?,
        status: row.get(4)?,
        kind: row.get(5)?,
        url: row.get(6)?,
        swarm_url: row.get(7)?,
        owner: row.get(8)?,
        source_url: row.get(9)?,
        backend_port: row.get(10)?,
        ai_model: row.get(11)?,
        sort_order: row.get(12)?,
    })
}

impl RegistryStore {
    /// All records in display order. Ties on sort_order fall back to
    /// insertion order (rowid), so the order is always total.
    pub async fn list_apps(&self) -> Result<Vec<AppRecord>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(&format!(
            "SELECT {} FROM apps ORDER BY sort_order ASC, rowid ASC",
            APP_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_app)?;

        let mut apps = Vec::new();
        for row in rows {
            apps.push(row?);
        }
        Ok(apps)
    }

    pub async fn get_app(&self, id: &str) -> Result<AppRecord> {
        let db = self.db.lock().await;
        db.query_row(
            &format!("SELECT {} FROM apps WHERE id = ?1", APP_COLUMNS),
            params![id],
            row_to_app,
        )
        .optional()?
        .ok_or_else(|| RegistryError::NotFound(format!("app '{}'", id)))
    }

    pub async fn create_app(&self, app: NewApp) -> Result<AppRecord> {
        let id = app.id.trim().to_string();
        let name = app.name.trim().to_string();
        if id.is_empty() || name.is_empty() {
            return Err(RegistryError::Validation(
                "id and name are required".to_string(),
            ));
        }

        let db = self.db.lock().await;

        let exists: i64 = db.query_row(
            "SELECT COUNT(*) FROM apps WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if exists > 0 {
            return Err(RegistryError::Conflict(format!(
                "app '{}' already exists",
                id
            )));
        }

        let sort_order = match app.sort_order {
            Some(order) => order,
            None => db.query_row(
                "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM apps",
                [],
                |row| row.get(0),
            )?,
        };

        db.execute(
            "INSERT INTO apps (id, name, description, icon_name, status, type, url, swarm_url, \
             owner, source_url, backend_port, ai_model, sort_order) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                id,
                name,
                app.description,
                app.icon_name,
                app.status,
                app.kind,
                app.url,
                app.swarm_url,
                app.owner,
                app.source_url,
                app.backend_port,
                app.ai_model,
                sort_order,
            ],
        )?;

        Ok(AppRecord {
            id,
            name,
            description: app.description,
            icon_name: app.icon_name,
            status: app.status,
            kind: app.kind,
            url: app.url,
            swarm_url: app.swarm_url,
            owner: app.owner,
            source_url: app.source_url,
            backend_port: app.backend_port,
            ai_model: app.ai_model,
            sort_order,
        })
    }

    /// Partial update. Reordering is a separate operation, so sort_order is
    /// deliberately untouchable from here.
    pub async fn update_app(&self, id: &str, patch: AppPatch) -> Result<AppRecord> {
        let existing = self.get_app(id).await?;

        let merged = AppRecord {
            id: existing.id,
            name: patch.name.unwrap_or(existing.name),
            description: patch.description.unwrap_or(existing.description),
            icon_name: patch.icon_name.unwrap_or(existing.icon_name),
            status: patch.status.unwrap_or(existing.status),
            kind: patch.kind.unwrap_or(existing.kind),
            url: patch.url.unwrap_or(existing.url),
            swarm_url: patch.swarm_url.unwrap_or(existing.swarm_url),
            owner: patch.owner.unwrap_or(existing.owner),
            source_url: patch.source_url.unwrap_or(existing.source_url),
            backend_port: patch.backend_port.unwrap_or(existing.backend_port),
            ai_model: patch.ai_model.unwrap_or(existing.ai_model),
            sort_order: existing.sort_order,
        };

        if merged.name.trim().is_empty() {
            return Err(RegistryError::Validation(
                "name cannot be empty".to_string(),
            ));
        }

        let db = self.db.lock().await;
        db.execute(
            "UPDATE apps SET name = ?2, description = ?3, icon_name = ?4, status = ?5, \
             type = ?6, url = ?7, swarm_url = ?8, owner = ?9, source_url = ?10, \
             backend_port = ?11, ai_model = ?12, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?1",
            params![
                merged.id,
                merged.name,
                merged.description,
                merged.icon_name,
                merged.status,
                merged.kind,
                merged.url,
                merged.swarm_url,
                merged.owner,
                merged.source_url,
                merged.backend_port,
                merged.ai_model,
            ],
        )?;

        Ok(merged)
    }

    /// Survivors keep their sort_order values; gaps are fine, only relative
    /// order matters.
    pub async fn delete_app(&self, id: &str) -> Result<()> {
        let db = self.db.lock().await;
        let rows = db.execute("DELETE FROM apps WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(RegistryError::NotFound(format!("app '{}'", id)));
        }
        Ok(())
    }

    /// Assign sort_order 0..n-1 following `ids`. The sequence must contain
    /// exactly the currently known ids, otherwise a stale client list could
    /// silently drop records. The assignment runs inside one transaction:
    /// a partially applied reorder is a correctness violation, not cosmetic.
    pub async fn reorder_apps(&self, ids: &[String]) -> Result<()> {
        let mut db = self.db.lock().await;

        let current: Vec<String> = {
            let mut stmt = db.prepare("SELECT id FROM apps")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            out
        };

        if ids.len() != current.len() {
            return Err(RegistryError::Validation(format!(
                "order must contain exactly {} ids, got {}",
                current.len(),
                ids.len()
            )));
        }
        let known: std::collections::HashSet<&str> = current.iter().map(String::as_str).collect();
        let mut seen = std::collections::HashSet::new();
        for id in ids {
            if !known.contains(id.as_str()) {
                return Err(RegistryError::Validation(format!("unknown id '{}'", id)));
            }
            if !seen.insert(id.as_str()) {
                return Err(RegistryError::Validation(format!("duplicate id '{}'", id)));
            }
        }

        let tx = db.transaction()?;
        for (position, id) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE apps SET sort_order = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
                params![position as i64, id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
