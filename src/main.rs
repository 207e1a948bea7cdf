//! Stargazer CLI entry point.

use anyhow::Result;
use clap::Parser;
use stargazer::cli::{commands, Cli, Commands};
use stargazer::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let explicit = cli.config.as_deref().map(PathBuf::from);
    let config_path = Settings::config_path(explicit.as_ref());
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging; a verbose agent shows its steps at info
    let log_level = match cli.verbose {
        0 if settings.agent.verbose => "info",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("stargazer={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Ask { query, model } => {
            commands::run_ask(query, model.clone(), settings).await?;
        }

        Commands::Apod { date, json } => {
            commands::run_apod(date.as_deref(), *json, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
