//! Stargazer - NASA's Astronomy Picture of the Day, explained by an LLM agent
//!
//! A small CLI and library that hands an APOD tool to a function-calling
//! agent, so a chat model can decide to fetch the picture of the day and
//! summarize it.
//!
//! # Architecture
//!
//! - `config` - Settings and two-tier credential loading (secret store, then environment)
//! - `apod` - Client for the APOD endpoint
//! - `llm` - Chat model abstraction and the OpenAI binding
//! - `agent` - Tools and the function-calling loop
//! - `orchestrator` - Wires the pieces together
//!
//! # Example
//!
//! ```rust,no_run
//! use stargazer::config::{CredentialLoader, Settings};
//! use stargazer::orchestrator::{Orchestrator, DEFAULT_QUERY};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = CredentialLoader::from_settings(&settings).load()?;
//!     let orchestrator = Orchestrator::new(&settings, &credentials)?;
//!
//!     let response = orchestrator.ask(DEFAULT_QUERY).await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod apod;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod openai;
pub mod orchestrator;

#[cfg(test)]
mod test_support;

pub use error::{Result, StargazerError};
