use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;

/// Operational state of a launcher tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStatus {
    Active,
    Maintenance,
    Disabled,
}

impl AppStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Active => "ACTIVE",
            AppStatus::Maintenance => "MAINTENANCE",
            AppStatus::Disabled => "DISABLED",
        }
    }
}

impl std::str::FromStr for AppStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(AppStatus::Active),
            "MAINTENANCE" => Ok(AppStatus::Maintenance),
            "DISABLED" => Ok(AppStatus::Disabled),
            other => Err(format!("unknown app status: {}", other)),
        }
    }
}

impl ToSql for AppStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for AppStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// What launching a tile means: open a web address, reference a local
/// executable, or switch to a view rendered by the client itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppKind {
    Url,
    ExecutableReference,
    InternalView,
}

impl AppKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppKind::Url => "URL",
            AppKind::ExecutableReference => "EXECUTABLE_REFERENCE",
            AppKind::InternalView => "INTERNAL_VIEW",
        }
    }
}

impl std::str::FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "URL" => Ok(AppKind::Url),
            "EXECUTABLE_REFERENCE" => Ok(AppKind::ExecutableReference),
            "INTERNAL_VIEW" => Ok(AppKind::InternalView),
            other => Err(format!("unknown app type: {}", other)),
        }
    }
}

impl ToSql for AppKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for AppKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// One row of the `apps` table, storage field naming.
#[derive(Debug, Clone, PartialEq)]
pub struct AppRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_name: String,
    pub status: AppStatus,
    pub kind: AppKind,
    pub url: Option<String>,
    pub swarm_url: Option<String>,
    pub owner: Option<String>,
    pub source_url: Option<String>,
    pub backend_port: Option<String>,
    pub ai_model: Option<String>,
    pub sort_order: i64,
}

/// Payload for creating a record. `sort_order` is optional; when absent the
/// record lands at the end of the list.
#[derive(Debug, Clone)]
pub struct NewApp {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_name: String,
    pub status: AppStatus,
    pub kind: AppKind,
    pub url: Option<String>,
    pub swarm_url: Option<String>,
    pub owner: Option<String>,
    pub source_url: Option<String>,
    pub backend_port: Option<String>,
    pub ai_model: Option<String>,
    pub sort_order: Option<i64>,
}

/// Partial update for a record. `None` fields keep their stored value.
/// Reordering is a separate operation, so there is no sort_order here.
#[derive(Debug, Clone, Default)]
pub struct AppPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub status: Option<AppStatus>,
    pub kind: Option<AppKind>,
    pub url: Option<Option<String>>,
    pub swarm_url: Option<Option<String>>,
    pub owner: Option<Option<String>>,
    pub source_url: Option<Option<String>>,
    pub backend_port: Option<Option<String>>,
    pub ai_model: Option<Option<String>>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AdminTokenRecord {
    pub id: String,
    pub name: String,
    pub created_at: String,
}
