use rusqlite::params;
use sha2::{Digest, Sha256};

use super::error::Result;
use super::types::AdminTokenRecord;
use super::RegistryStore;

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn generate_raw_token() -> String {
    let bytes: [u8; 16] = rand::random();
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!("hgr_{}", hex)
}

impl RegistryStore {
    /// Returns the raw token alongside the stored record. Only the sha256
    /// hash is persisted; the raw value is shown once.
    pub async fn create_admin_token(&self, name: &str) -> Result<(String, AdminTokenRecord)> {
        let raw_token = generate_raw_token();
        let token_hash = hash_token(&raw_token);
        let id = uuid::Uuid::new_v4().to_string();

        let db = self.db.lock().await;
        db.execute(
            "INSERT INTO admin_tokens (id, name, token_hash) VALUES (?1, ?2, ?3)",
            params![id, name, token_hash],
        )?;

        let created_at = db.query_row(
            "SELECT created_at FROM admin_tokens WHERE id = ?1",
            params![id],
            |row| row.get::<_, String>(0),
        )?;

        Ok((
            raw_token,
            AdminTokenRecord {
                id,
                name: name.to_string(),
                created_at,
            },
        ))
    }

    pub async fn list_admin_tokens(&self) -> Result<Vec<AdminTokenRecord>> {
        let db = self.db.lock().await;
        let mut stmt =
            db.prepare("SELECT id, name, created_at FROM admin_tokens ORDER BY created_at DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(AdminTokenRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        let mut tokens = Vec::new();
        for row in rows {
            tokens.push(row?);
        }
        Ok(tokens)
    }

    pub async fn revoke_admin_token(&self, id: &str) -> Result<bool> {
        let db = self.db.lock().await;
        let rows = db.execute("DELETE FROM admin_tokens WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    pub async fn validate_admin_token(&self, raw_token: &str) -> Result<bool> {
        let token_hash = hash_token(raw_token);
        let db = self.db.lock().await;
        let count: i64 = db.query_row(
            "SELECT COUNT(*) FROM admin_tokens WHERE token_hash = ?1",
            params![token_hash],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub async fn has_any_admin_tokens(&self) -> Result<bool> {
        let db = self.db.lock().await;
        let count: i64 =
            db.query_row("SELECT COUNT(*) FROM admin_tokens", [], |row| row.get(0))?;
        Ok(count > 0)
    }
}
