//! NASA Astronomy Picture of the Day.
//!
//! A thin client over the public APOD endpoint and the record it returns.

mod client;
mod models;

pub use client::ApodClient;
pub use models::{parse_date, ApodRecord, MediaType, FIRST_APOD_DATE};
