//! Configuration module for Stargazer.
//!
//! Handles application settings and credential resolution.

mod credentials;
mod settings;

pub use credentials::{
    CredentialLoader, CredentialSource, Credentials, FileSecretStore, MemorySecretStore, Secret,
    SecretStore, NASA_ENV_VAR, NASA_STORE_KEY, OPENAI_ENV_VAR, OPENAI_STORE_KEY,
};
pub use settings::{
    AgentSettings, AgentStrategy, ApodSettings, LlmSettings, SecretsSettings, Settings,
};
