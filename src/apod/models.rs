//! Astronomy Picture of the Day data types.

use crate::error::{Result, StargazerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The first date for which APOD has an entry.
pub const FIRST_APOD_DATE: (i32, u32, u32) = (1995, 6, 16);

/// Kind of media published for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// One day's entry as returned by the APOD API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodRecord {
    /// Publication date (YYYY-MM-DD).
    pub date: String,
    pub title: String,
    pub explanation: String,
    /// Image or video URL. Absent on days whose media is neither.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// High-resolution image URL, only for images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Video thumbnail, only when requested and the media is a video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
}

impl ApodRecord {
    /// Whether today's entry is a video rather than an image.
    pub fn is_video(&self) -> bool {
        self.media_type == Some(MediaType::Video)
    }
}

/// Error body shapes NASA's API gateway and APOD service return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiErrorBody {
    Gateway { error: GatewayError },
    Service { msg: String },
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl ApiErrorBody {
    pub(crate) fn message(&self) -> String {
        match self {
            ApiErrorBody::Gateway { error } => match &error.code {
                Some(code) => format!("{} ({})", error.message, code),
                None => error.message.clone(),
            },
            ApiErrorBody::Service { msg } => msg.clone(),
        }
    }
}

/// Parse and validate a requested APOD date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        StargazerError::InvalidDate(format!("'{}' is not in YYYY-MM-DD format", input))
    })?;

    let (y, m, d) = FIRST_APOD_DATE;
    let first = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| StargazerError::InvalidDate("invalid first APOD date".to_string()))?;
    if date < first {
        return Err(StargazerError::InvalidDate(format!(
            "{} is before the first APOD ({})",
            date, first
        )));
    }

    Ok(date)
}
