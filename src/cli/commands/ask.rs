//! Ask command implementation.

use crate::cli::output::truncate;
use crate::cli::Output;
use crate::config::{CredentialLoader, Settings};
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(query: &str, model: Option<String>, settings: Settings) -> Result<()> {
    let credentials = match CredentialLoader::from_settings(&settings).load() {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'stargazer doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let orchestrator = Orchestrator::with_model_override(&settings, &credentials, model.as_deref())?;

    let spinner = Output::spinner("Agent working...");

    match orchestrator.ask(query).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    let marker = if call.is_error { " (failed)" } else { "" };
                    Output::info(&format!(
                        "  {} {}{}",
                        call.name,
                        truncate(&call.arguments, 60),
                        marker
                    ));
                }
                println!();
            }

            Output::info(&format!("Completed in {} iteration(s)", response.iterations));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
