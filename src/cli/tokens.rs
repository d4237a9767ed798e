use anyhow::Result;
use console::style;

use crate::core::registry::RegistryStore;
use crate::core::terminal::{print_error, print_success};

/// Admin token management works against the local database directly, so
/// the first token can be minted before the server is ever exposed.
pub async fn run_token_command(args: &[String]) -> Result<()> {
    let sub_cmd = if args.len() > 2 { args[2].as_str() } else { "" };
    let mut db_path = super::default_db_path();
    if let Ok(path) = std::env::var("HANGAR_DB") {
        if !path.is_empty() {
            db_path = path.into();
        }
    }
    let mut name = String::new();
    let mut token_id = String::new();

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--db" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone().into();
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => {
                if name.is_empty() && token_id.is_empty() {
                    match sub_cmd {
                        "create" => name = args[i].clone(),
                        "revoke" | "delete" | "rm" => token_id = args[i].clone(),
                        _ => {}
                    }
                }
                i += 1;
            }
        }
    }

    let store = RegistryStore::open(&db_path)?;

    match sub_cmd {
        "create" => {
            if name.is_empty() {
                println!(
                    "{}",
                    style("Usage: hangar token create <name> [--db <path>]").bold()
                );
                println!("  Example: hangar token create it-helpdesk");
                return Ok(());
            }

            let (raw, record) = store.create_admin_token(&name).await?;
            println!();
            print_success(&format!("Admin token '{}' created.", record.name));
            println!(
                "\n  {} {}\n",
                style("Token:").bold(),
                style(&raw).green().bold()
            );
            println!(
                "  {} Save this token now - it will not be shown again.",
                style("⚠").yellow()
            );
            println!(
                "  {} Use it with: Authorization: Bearer {}\n",
                style("→").cyan(),
                raw
            );
        }
        "list" | "ls" => {
            let tokens = store.list_admin_tokens().await?;
            if tokens.is_empty() {
                println!(
                    "  {} No admin tokens. Mutations stay loopback-only until one exists.",
                    style("●").dim()
                );
            } else {
                println!("\n  {} Admin tokens:\n", style("●").cyan());
                for tk in &tokens {
                    let short_id = if tk.id.len() > 8 { &tk.id[..8] } else { &tk.id };
                    println!(
                        "  {} {} (id: {}…)  created: {}",
                        style("→").cyan(),
                        style(&tk.name).white().bold(),
                        style(short_id).dim(),
                        style(&tk.created_at).dim()
                    );
                }
                println!();
            }
        }
        "revoke" | "delete" | "rm" => {
            if token_id.is_empty() {
                println!(
                    "{}",
                    style("Usage: hangar token revoke <token_id> [--db <path>]").bold()
                );
                return Ok(());
            }

            if store.revoke_admin_token(&token_id).await? {
                print_success("Token revoked.");
            } else {
                print_error(&format!("No token with id '{}'.", token_id));
            }
        }
        _ => {
            println!("{}", style("Usage: hangar token <command> [options]").bold());
            println!("  • create <name>    Create a new admin token");
            println!("  • list             List admin tokens");
            println!("  • revoke <id>      Revoke an admin token");
            println!("\n  Options: --db <path> (default: data dir registry.db)");
        }
    }

    Ok(())
}
