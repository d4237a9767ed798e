//! Storage ↔ client field mapping. The store speaks snake_case, clients
//! speak camelCase; the mapping is total and lossless in both directions,
//! and absent optional fields serialize as explicit `null` rather than
//! being dropped.

use serde::{Deserialize, Deserializer};

use super::types::{AppKind, AppPatch, AppRecord, AppStatus, NewApp};

/// Client-facing shape of an application record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_name: String,
    pub status: AppStatus,
    #[serde(rename = "type")]
    pub kind: AppKind,
    pub url: Option<String>,
    pub swarm_url: Option<String>,
    pub owner: Option<String>,
    pub source_url: Option<String>,
    pub backend_port: Option<String>,
    pub ai_model: Option<String>,
    pub sort_order: i64,
}

impl From<AppRecord> for AppView {
    fn from(record: AppRecord) -> Self {
        AppView {
            id: record.id,
            name: record.name,
            description: record.description,
            icon_name: record.icon_name,
            status: record.status,
            kind: record.kind,
            url: record.url,
            swarm_url: record.swarm_url,
            owner: record.owner,
            source_url: record.source_url,
            backend_port: record.backend_port,
            ai_model: record.ai_model,
            sort_order: record.sort_order,
        }
    }
}

impl From<AppView> for AppRecord {
    fn from(view: AppView) -> Self {
        AppRecord {
            id: view.id,
            name: view.name,
            description: view.description,
            icon_name: view.icon_name,
            status: view.status,
            kind: view.kind,
            url: view.url,
            swarm_url: view.swarm_url,
            owner: view.owner,
            source_url: view.source_url,
            backend_port: view.backend_port,
            ai_model: view.ai_model,
            sort_order: view.sort_order,
        }
    }
}

/// POST body: a full record, except sortOrder may be omitted to mean
/// "append at the end".
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppView {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_name: String,
    pub status: AppStatus,
    #[serde(rename = "type")]
    pub kind: AppKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub swarm_url: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub backend_port: Option<String>,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl From<NewAppView> for NewApp {
    fn from(view: NewAppView) -> Self {
        NewApp {
            id: view.id,
            name: view.name,
            description: view.description,
            icon_name: view.icon_name,
            status: view.status,
            kind: view.kind,
            url: view.url,
            swarm_url: view.swarm_url,
            owner: view.owner,
            source_url: view.source_url,
            backend_port: view.backend_port,
            ai_model: view.ai_model,
            sort_order: view.sort_order,
        }
    }
}

/// PUT body: every field optional. For nullable fields a missing key means
/// "keep", an explicit `null` means "clear".
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPatchView {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub status: Option<AppStatus>,
    #[serde(rename = "type", default)]
    pub kind: Option<AppKind>,
    #[serde(default, deserialize_with = "keep_or_clear")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "keep_or_clear")]
    pub swarm_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "keep_or_clear")]
    pub owner: Option<Option<String>>,
    #[serde(default, deserialize_with = "keep_or_clear")]
    pub source_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "keep_or_clear")]
    pub backend_port: Option<Option<String>>,
    #[serde(default, deserialize_with = "keep_or_clear")]
    pub ai_model: Option<Option<String>>,
}

fn keep_or_clear<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<AppPatchView> for AppPatch {
    fn from(view: AppPatchView) -> Self {
        AppPatch {
            name: view.name,
            description: view.description,
            icon_name: view.icon_name,
            status: view.status,
            kind: view.kind,
            url: view.url,
            swarm_url: view.swarm_url,
            owner: view.owner,
            source_url: view.source_url,
            backend_port: view.backend_port,
            ai_model: view.ai_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> AppRecord {
        AppRecord {
            id: "fleet".to_string(),
            name: "Fleet".to_string(),
            description: "Fleet Management".to_string(),
            icon_name: "Truck".to_string(),
            status: AppStatus::Maintenance,
            kind: AppKind::ExecutableReference,
            url: Some(r"C:\Apps\Fleet\launcher.exe".to_string()),
            swarm_url: None,
            owner: Some("ops".to_string()),
            source_url: None,
            backend_port: Some("8443".to_string()),
            ai_model: None,
            sort_order: 6,
        }
    }

    #[test]
    fn record_view_round_trip_is_lossless() {
        let record = sample_record();
        let back: AppRecord = AppView::from(record.clone()).into();
        assert_eq!(back, record);
    }

    #[test]
    fn view_serializes_camel_case_with_explicit_nulls() {
        let json = serde_json::to_value(AppView::from(sample_record())).unwrap();
        assert_eq!(json["iconName"], "Truck");
        assert_eq!(json["type"], "EXECUTABLE_REFERENCE");
        assert_eq!(json["status"], "MAINTENANCE");
        assert_eq!(json["sortOrder"], 6);
        // Absent fields are present as null, never silently omitted.
        assert!(json.as_object().unwrap().contains_key("swarmUrl"));
        assert_eq!(json["swarmUrl"], serde_json::Value::Null);
        assert_eq!(json["aiModel"], serde_json::Value::Null);
    }

    #[test]
    fn view_json_round_trip_preserves_every_field() {
        let view = AppView::from(sample_record());
        let json = serde_json::to_string(&view).unwrap();
        let back: AppView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn patch_distinguishes_missing_from_null() {
        let patch: AppPatchView =
            serde_json::from_str(r#"{"name":"New Name","url":null}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("New Name"));
        // url was explicitly null: clear it.
        assert_eq!(patch.url, Some(None));
        // swarmUrl was absent: keep it.
        assert_eq!(patch.swarm_url, None);
    }

    #[test]
    fn new_app_view_accepts_minimal_body() {
        let body: NewAppView = serde_json::from_str(
            r#"{"id":"wiki","name":"Wiki","status":"ACTIVE","type":"URL"}"#,
        )
        .unwrap();
        let new_app: NewApp = body.into();
        assert_eq!(new_app.id, "wiki");
        assert_eq!(new_app.sort_order, None);
        assert_eq!(new_app.url, None);
    }
}
