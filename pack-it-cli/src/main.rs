use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod config;

use app::App;
use commands::{AuthCommand, ConfigCommand, ItemCommand, ListCommand, SuggestCommand, SyncCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "packit")]
#[command(version)]
#[command(about = "Packing lists with cloud sync and AI suggestions", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage packing lists
    List(ListCommand),

    /// Manage items in the active list
    Item(ItemCommand),

    /// Generate packing suggestions for a trip
    Suggest(SuggestCommand),

    /// Sign in, sign up or sign out
    Auth(AuthCommand),

    /// Sync with the document server
    Sync(SyncCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pack_it_core=warn,pack_it_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    let command = match &cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let mut app = App::open(&config)?;

    // Restore BEFORE commands that work on lists
    if is_list_command(command) {
        app.try_restore();
    }

    let result = execute_command(command, &mut app);

    // Auto-sync AFTER write commands (only if command succeeded)
    if result.is_ok() && is_write_command(command) {
        app.try_auto_sync();
    }

    result
}

fn execute_command(
    command: &Commands,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List(cmd) => cmd.run(app),
        Commands::Item(cmd) => cmd.run(app),
        Commands::Suggest(cmd) => cmd.run(app),
        Commands::Auth(cmd) => cmd.run(app),
        Commands::Sync(cmd) => cmd.run(app),
        Commands::Config(cmd) => cmd.run(&app.config),
    }
}

/// Returns true if the command reads or changes lists and should see the cloud copy first.
fn is_list_command(cmd: &Commands) -> bool {
    matches!(
        cmd,
        Commands::List(_) | Commands::Item(_) | Commands::Suggest(_)
    )
}

/// Returns true if the command is a write operation that should sync after execution.
fn is_write_command(cmd: &Commands) -> bool {
    match cmd {
        Commands::List(list) => list.is_write(),
        Commands::Item(_) | Commands::Suggest(_) => true,
        _ => false,
    }
}
