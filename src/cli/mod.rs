//! CLI module for Stargazer.

pub mod commands;
mod output;

pub use output::Output;

use crate::orchestrator::DEFAULT_QUERY;
use clap::{Parser, Subcommand};

/// Stargazer - ask an LLM agent about NASA's Astronomy Picture of the Day
///
/// Credentials are read from the secrets file (open_ai_key, nasa_api_key)
/// or from the OPENAI_API_KEY and NASA_API_KEY environment variables.
#[derive(Parser, Debug)]
#[command(name = "stargazer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the agent a question
    Ask {
        /// The question to ask
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Fetch the Astronomy Picture of the Day directly, without the model
    Apod {
        /// Date of the entry (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
