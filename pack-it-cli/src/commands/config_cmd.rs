use clap::{Args, Subcommand, ValueEnum};

use crate::config::{Config, ConfigSource};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Table => print_table(config),
                }
                Ok(())
            }
        }
    }
}

fn print_table(config: &Config) {
    println!("Configuration");
    println!("=============\n");

    if let Some(path) = &config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!(
            "Config file: {} (not found)",
            Config::default_config_path().display()
        );
    }
    println!();

    println!("data_dir: {}", config.data_dir.value.display());
    println!("  source: {}", config.data_dir.source);
    println!();

    println!(
        "sync.server_url: {}",
        config.sync.server_url.as_deref().unwrap_or("(not set)")
    );
    println!("sync.auto_sync: {}", config.sync.auto_sync);
    println!();

    println!("auth.api_key: {}", secret(&config.auth.api_key));
    println!("weather.api_key: {}", secret(&config.weather.api_key));
    println!("ai.api_key: {}", secret(&config.ai.api_key));
    println!(
        "ai.model: {}",
        config.ai.model.as_deref().unwrap_or("(default)")
    );
    if config.data_dir.source == ConfigSource::Environment {
        println!();
        println!("PACKIT_DATA_DIR overrides the configured data_dir.");
    }
}

fn secret(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "(not set)"
    }
}
