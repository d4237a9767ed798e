use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use super::error::Result;
use super::RegistryStore;

impl RegistryStore {
    pub async fn all_settings(&self) -> Result<BTreeMap<String, String>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare("SELECT key, value FROM settings")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut settings = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            settings.insert(key, value);
        }
        Ok(settings)
    }

    pub async fn setting(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().await;
        let value = db
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert a batch of keys in one transaction.
    pub async fn put_settings(&self, entries: &[(String, String)]) -> Result<()> {
        let mut db = self.db.lock().await;
        let tx = db.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
