//! Sync CLI commands for the signed-in user's cloud document.

use chrono::Utc;
use clap::{Args, Subcommand};

use pack_it_core::sync::{check_server, sync_label};

use crate::app::App;

/// Sync with the document server
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Subcommand)]
enum SyncSubcommand {
    /// Upload local lists, replacing the cloud copy (default)
    Push,
    /// Download the cloud copy, replacing local lists
    Pull,
    /// Show sync configuration and server status
    Status,
}

impl SyncCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            None | Some(SyncSubcommand::Push) => rt.block_on(push(app)),
            Some(SyncSubcommand::Pull) => rt.block_on(pull(app)),
            Some(SyncSubcommand::Status) => rt.block_on(status(app)),
        }
    }
}

async fn push(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let (uid, sync) = app.sync_target()?;
    println!("Uploading lists...");
    sync.save_user_packing_data(&mut app.store, &uid).await?;
    println!(
        "✓ Uploaded {} list{}",
        app.store.lists().len(),
        if app.store.lists().len() == 1 { "" } else { "s" }
    );
    Ok(())
}

async fn pull(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let (uid, sync) = app.sync_target()?;
    println!("Downloading lists...");
    if sync.pull_user_packing_data(&mut app.store, &uid).await? {
        println!("✓ Replaced local lists with the cloud copy");
    } else {
        println!("No cloud copy yet. Run 'packit sync push' to create one.");
    }
    Ok(())
}

async fn status(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    println!("Sync Configuration");
    println!("==================");
    println!();

    let Some(server_url) = app.config.sync.server_url.as_deref() else {
        println!("Status: Not configured");
        println!();
        println!("To enable sync, add to your config file:");
        println!();
        println!("  sync:");
        println!("    server_url: \"https://packit.example.com\"");
        println!();
        println!("Or set environment variable:");
        println!("  PACKIT_SYNC_URL");
        return Ok(());
    };

    println!("Server:    {}", server_url);
    println!(
        "Auto-sync: {}",
        if app.config.sync.auto_sync {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "Account:   {}",
        app.session.user().unwrap_or("not signed in")
    );
    println!(
        "Last sync: {}",
        sync_label(app.store.last_synced_at(), Utc::now().timestamp_millis())
    );
    println!();

    print!("Server status: ");
    if check_server(server_url).await {
        println!("✓ connected");
    } else {
        println!("✗ unreachable");
    }
    Ok(())
}
