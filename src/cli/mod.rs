mod tokens;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use console::style;

use crate::client::http::HttpRegistryApi;
use crate::client::LauncherSession;
use crate::core::registry::types::AppStatus;
use crate::core::registry::RegistryStore;
use crate::core::terminal::{self, print_error, print_success, GuideSection};
use crate::interfaces::web::{self, ApiServerConfig};

const DEFAULT_API_PORT: u16 = 3105;

fn print_help() {
    terminal::print_banner();

    GuideSection::new("Server")
        .command("serve", "Start the registry API server")
        .command("init", "Create the database and seed the default tiles")
        .print();

    GuideSection::new("Launcher")
        .command("list", "Show the app directory in launch order")
        .print();

    GuideSection::new("Administration")
        .command("token", "Manage admin API tokens")
        .print();

    println!(
        "\n {} {} <command> [options]\n",
        style("Usage:").bold(),
        style("hangar").green()
    );
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hangar")
        .join("registry.db")
}

fn resolve_db_path() -> PathBuf {
    match std::env::var("HANGAR_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => default_db_path(),
    }
}

pub(crate) fn parse_serve_flags(
    args: &[String],
    start: usize,
    mut host: String,
    mut port: u16,
    mut db_path: PathBuf,
) -> (String, u16, PathBuf) {
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                if i + 1 < args.len() {
                    host = args[i + 1].clone();
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--port" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(DEFAULT_API_PORT);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--db" => {
                if i + 1 < args.len() {
                    db_path = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    (host, port, db_path)
}

pub(crate) fn parse_list_flags(args: &[String], start: usize, mut api_url: String) -> (String, String) {
    let mut query = String::new();
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--api" => {
                if i + 1 < args.len() {
                    api_url = args[i + 1].clone();
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => {
                if query.is_empty() {
                    query = args[i].clone();
                }
                i += 1;
            }
        }
    }
    (api_url, query)
}

async fn run_serve(args: &[String]) -> Result<()> {
    let host = env_or("HANGAR_HOST", "127.0.0.1");
    let port: u16 = env_or("HANGAR_PORT", "")
        .parse()
        .unwrap_or(DEFAULT_API_PORT);
    let (host, port, db_path) = parse_serve_flags(args, 2, host, port, resolve_db_path());

    crate::logging::init();
    let store = Arc::new(RegistryStore::open(&db_path)?);

    web::serve(ApiServerConfig {
        store,
        api_host: host,
        api_port: port,
    })
    .await
}

async fn run_init(args: &[String]) -> Result<()> {
    let (_, _, db_path) = parse_serve_flags(
        args,
        2,
        "127.0.0.1".to_string(),
        DEFAULT_API_PORT,
        resolve_db_path(),
    );

    let store = RegistryStore::open(db_path)?;
    let seeded = store.seed_default_apps().await?;
    if seeded == 0 {
        println!(
            "  {} Registry already initialized at {}",
            style("●").dim(),
            store.db_path().display()
        );
    } else {
        print_success(&format!(
            "Registry created at {} with {} default apps.",
            store.db_path().display(),
            seeded
        ));
    }
    Ok(())
}

async fn run_list(args: &[String]) -> Result<()> {
    let api_url = env_or("HANGAR_API", &format!("http://127.0.0.1:{}", DEFAULT_API_PORT));
    let (api_url, query) = parse_list_flags(args, 2, api_url);
    let token = std::env::var("HANGAR_TOKEN").ok().filter(|t| !t.is_empty());

    let api = Arc::new(HttpRegistryApi::new(api_url, token));
    let mut session = LauncherSession::new(api);
    session.load().await;

    if let Some(notice) = session.take_notice() {
        print_error(&notice);
        println!("  Is the registry running? Try: hangar serve");
        return Ok(());
    }

    let apps = session.filtered(&query);
    if apps.is_empty() {
        if query.is_empty() {
            println!("  {} The registry is empty. Run: hangar init", style("●").dim());
        } else {
            println!("  {} No apps match '{}'.", style("●").dim(), query);
        }
        return Ok(());
    }

    println!();
    for app in apps {
        let status = match app.status {
            AppStatus::Active => style(app.status.as_str()).green(),
            AppStatus::Maintenance => style(app.status.as_str()).yellow(),
            AppStatus::Disabled => style(app.status.as_str()).dim(),
        };
        println!(
            "  {}  {:<22} {:<12} {}",
            LauncherSession::icon_for(app),
            style(&app.name).bold(),
            status,
            style(&app.description).dim()
        );
    }
    println!();
    Ok(())
}

pub async fn run_main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "serve" => run_serve(&args).await,
        "init" => run_init(&args).await,
        "list" | "ls" => run_list(&args).await,
        "token" | "tokens" => tokens::run_token_command(&args).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        cmd => {
            print_error(&format!("Unknown command: {}", cmd));
            print_help();
            Ok(())
        }
    }
}
