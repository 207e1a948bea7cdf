//! APOD command implementation.

use crate::apod::{parse_date, ApodClient};
use crate::cli::Output;
use crate::config::{CredentialLoader, Settings};
use anyhow::Result;

/// Fetch and print an APOD entry without involving the model.
pub async fn run_apod(date: Option<&str>, json: bool, settings: Settings) -> Result<()> {
    let date = date.map(parse_date).transpose()?;

    let api_key = match CredentialLoader::from_settings(&settings).nasa_key() {
        Ok(key) => key,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'stargazer doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let client = ApodClient::new(api_key, &settings.apod)?;

    let spinner = Output::spinner("Fetching Astronomy Picture of the Day...");
    let result = client.fetch(date).await;
    spinner.finish_and_clear();

    match result {
        Ok(record) if json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Ok(record) => {
            Output::apod_record(&record);
        }
        Err(e) => {
            Output::error(&format!("Failed to fetch APOD: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
