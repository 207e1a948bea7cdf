//! HTTP client for NASA's APOD endpoint.

use super::models::{ApiErrorBody, ApodRecord};
use crate::config::{ApodSettings, Secret};
use crate::error::{Result, StargazerError};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client for the Astronomy Picture of the Day API.
///
/// Building a client performs no I/O. Each [`ApodClient::fetch`] call makes
/// exactly one GET request.
#[derive(Clone)]
pub struct ApodClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Secret,
    thumbs: bool,
}

impl ApodClient {
    /// Create a client bound to an API key.
    pub fn new(api_key: Secret, settings: &ApodSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            StargazerError::Config(format!("Invalid APOD base URL '{}': {}", settings.base_url, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
            thumbs: settings.thumbs,
        })
    }

    /// Build the request URL for a date, or for today when `None`.
    pub fn request_url(&self, date: Option<NaiveDate>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", self.api_key.expose());
            if let Some(date) = date {
                query.append_pair("date", &date.format("%Y-%m-%d").to_string());
            }
            if self.thumbs {
                query.append_pair("thumbs", "true");
            }
        }
        url
    }

    /// Fetch the entry for a date, or today's entry when `None`.
    #[instrument(skip(self))]
    pub async fn fetch(&self, date: Option<NaiveDate>) -> Result<ApodRecord> {
        let response = self.http.get(self.request_url(date)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("APOD responded {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message())
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(StargazerError::Apod {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<ApodRecord>(&body)
            .map_err(|e| StargazerError::ApodPayload(e.to_string()))
    }
}

impl std::fmt::Debug for ApodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApodClient")
            .field("base_url", &self.base_url.as_str())
            .field("thumbs", &self.thumbs)
            .finish()
    }
}
