use tracing::info;

use super::error::Result;
use super::types::{AppKind, AppStatus, NewApp};
use super::RegistryStore;

#[allow(clippy::too_many_arguments)]
fn tile(
    id: &str,
    name: &str,
    description: &str,
    icon_name: &str,
    status: AppStatus,
    kind: AppKind,
    url: Option<&str>,
    order: i64,
) -> NewApp {
    NewApp {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon_name: icon_name.to_string(),
        status,
        kind,
        url: url.map(str::to_string),
        swarm_url: None,
        owner: None,
        source_url: None,
        backend_port: None,
        ai_model: None,
        sort_order: Some(order),
    }
}

impl RegistryStore {
    /// Insert the stock launcher tiles into an empty registry. Returns the
    /// number of records written (0 when the table already has rows).
    pub async fn seed_default_apps(&self) -> Result<usize> {
        if !self.list_apps().await?.is_empty() {
            return Ok(0);
        }

        let defaults = [
            tile(
                "chat",
                "Chat",
                "AI Corporate Assistant",
                "MessageSquare",
                AppStatus::Active,
                AppKind::InternalView,
                None,
                0,
            ),
            tile(
                "agent",
                "Agent",
                "Field Agent Portal",
                "UserCheck",
                AppStatus::Active,
                AppKind::Url,
                Some("https://agent.corp.example"),
                1,
            ),
            tile(
                "project",
                "Project",
                "Project Management Suite",
                "Briefcase",
                AppStatus::Active,
                AppKind::Url,
                Some("https://project.corp.example"),
                2,
            ),
            tile(
                "dashboard",
                "Dashboard",
                "Executive KPI Overview",
                "LayoutDashboard",
                AppStatus::Maintenance,
                AppKind::Url,
                Some("https://dash.corp.example"),
                3,
            ),
            tile(
                "datahub",
                "DataHub",
                "Central Data Warehouse",
                "Database",
                AppStatus::Maintenance,
                AppKind::Url,
                None,
                4,
            ),
            tile(
                "engineering",
                "Engineering",
                "CAD & Specs Library",
                "DraftingCompass",
                AppStatus::Maintenance,
                AppKind::Url,
                None,
                5,
            ),
            tile(
                "fleet",
                "Fleet",
                "Fleet Management",
                "Truck",
                AppStatus::Maintenance,
                AppKind::ExecutableReference,
                Some(r"C:\Apps\Fleet\launcher.exe"),
                6,
            ),
            tile(
                "picklist",
                "PickList",
                "Warehouse Picking",
                "ClipboardList",
                AppStatus::Maintenance,
                AppKind::Url,
                None,
                7,
            ),
        ];

        let count = defaults.len();
        for app in defaults {
            self.create_app(app).await?;
        }
        info!("Seeded {} default launcher tiles", count);
        Ok(count)
    }
}
