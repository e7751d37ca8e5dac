//! client-context - Command Line Entry Point
//!
//! Usage:
//!   client-context list             # List clients, marking the selected one
//!   client-context current          # Show the selected client
//!   client-context select <ID>      # Select and remember a client

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client_context::config::AppConfig;
use client_context::context::{SelectionHandle, provide_selection, use_selection};
use client_context::domain::{Client, ClientId};
use client_context::services::SupabaseStore;
use client_context::state::SelectionManager;
use client_context::storage::FileKeyValueStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "client-context")]
#[command(about = "Inspect and change the dashboard's selected client")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Local storage file (defaults to the platform data directory)
    #[arg(short = 's', long)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all clients, newest first
    List,
    /// Show the selected client
    Current,
    /// Select a client by id
    Select {
        /// Client id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config.validate()?;
            config
        }
        None => AppConfig::load()?,
    };
    tracing::info!(store = %config.supabase, "Starting client-context");

    let kv = match &args.storage {
        Some(path) => FileKeyValueStore::open(path),
        None => FileKeyValueStore::open_default()?,
    };

    let store = SupabaseStore::new(config.supabase).context("Failed to create HTTP client")?;
    let manager = SelectionManager::init(Arc::new(store), Arc::new(kv)).await;
    let handle = SelectionHandle::from(manager);

    provide_selection(handle, run(args.command)).await
}

async fn run(command: Command) -> Result<()> {
    let selection = use_selection()?;

    match command {
        Command::List => {
            let selected = selection.snapshot().selected_id().cloned();
            let clients = selection.clients();
            if clients.is_empty() {
                println!("No clients found");
            }
            for client in clients {
                let marker = if Some(&client.id) == selected.as_ref() { "*" } else { " " };
                println!("{marker} {}", describe(&client));
            }
        }
        Command::Current => match selection.selection() {
            Some(client) => println!("{}", describe(&client)),
            None => println!("No client selected"),
        },
        Command::Select { id } => {
            let id = ClientId::from(id);
            let Some(client) = selection.clients().into_iter().find(|c| c.id == id) else {
                bail!("No client with id {id}");
            };
            println!("Selected {}", describe(&client));
            selection.set_selection(Some(client));
        }
    }

    Ok(())
}

fn describe(client: &Client) -> String {
    format!(
        "{}  {}  (created {})",
        client.id,
        client.display_name(),
        client.created_at.format("%Y-%m-%d %H:%M")
    )
}
