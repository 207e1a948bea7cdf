//! Credential loading.
//!
//! Each secret is looked up in a host secret store first and in the process
//! environment second. A store that cannot be opened is skipped. Resolution
//! fails before any client is built if neither source yields a non-empty value.

use super::Settings;
use crate::error::{Result, StargazerError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Secret store key for the language-model API key.
pub const OPENAI_STORE_KEY: &str = "open_ai_key";
/// Secret store key for the NASA API key.
pub const NASA_STORE_KEY: &str = "nasa_api_key";
/// Environment variable for the language-model API key.
pub const OPENAI_ENV_VAR: &str = "OPENAI_API_KEY";
/// Environment variable for the NASA API key.
pub const NASA_ENV_VAR: &str = "NASA_API_KEY";

/// A host-provided store of named secrets.
pub trait SecretStore: Send + Sync {
    /// Look up a secret by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Human-readable location of the store, for diagnostics.
    fn describe(&self) -> String;
}

/// Secret store backed by a TOML file of `name = "value"` pairs.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileSecretStore {
    /// Open and parse the secrets file.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StargazerError::SecretStore(format!("{}: {}", path.display(), e))
        })?;
        let values: HashMap<String, String> = toml::from_str(&content).map_err(|e| {
            StargazerError::SecretStore(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory secret store.
#[derive(Debug, Default, Clone)]
pub struct MemorySecretStore {
    values: HashMap<String, String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret, returning the store for chaining.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// A secret string whose `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a value, rejecting empty or whitespace-only strings.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret(****)")
    }
}

/// Where a secret was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretStore,
    Environment,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::SecretStore => write!(f, "secret store"),
            CredentialSource::Environment => write!(f, "environment"),
        }
    }
}

/// The credential pair needed to build the agent.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub openai_api_key: Secret,
    pub nasa_api_key: Secret,
}

impl Credentials {
    /// Build credentials directly from values.
    pub fn new(openai_api_key: &str, nasa_api_key: &str) -> Result<Self> {
        let openai_api_key =
            Secret::new(openai_api_key).ok_or_else(|| missing(OPENAI_STORE_KEY, OPENAI_ENV_VAR))?;
        let nasa_api_key =
            Secret::new(nasa_api_key).ok_or_else(|| missing(NASA_STORE_KEY, NASA_ENV_VAR))?;
        Ok(Self {
            openai_api_key,
            nasa_api_key,
        })
    }
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Two-tier credential resolver.
pub struct CredentialLoader {
    store: Option<Box<dyn SecretStore>>,
    env: EnvLookup,
}

impl CredentialLoader {
    /// Create a loader from an optional store and an environment lookup.
    pub fn new<F>(store: Option<Box<dyn SecretStore>>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            store,
            env: Box::new(env),
        }
    }

    /// Create a loader that reads the configured secrets file and the
    /// process environment.
    pub fn from_settings(settings: &Settings) -> Self {
        let path = settings.secrets_path();
        let store: Option<Box<dyn SecretStore>> = if !path.exists() {
            debug!("No secret store at {}, using environment", path.display());
            None
        } else {
            match FileSecretStore::open(&path) {
                Ok(store) => {
                    debug!("Using secret store at {}", path.display());
                    Some(Box::new(store))
                }
                Err(e) => {
                    warn!("Ignoring unreadable secret store, falling back to environment: {}", e);
                    None
                }
            }
        };

        Self::new(store, |name| std::env::var(name).ok())
    }

    /// Location of the secret store, if one is available.
    pub fn store_location(&self) -> Option<String> {
        self.store.as_ref().map(|s| s.describe())
    }

    /// Resolve one secret from the store, then the environment.
    pub fn lookup(&self, store_key: &str, env_var: &str) -> Result<(Secret, CredentialSource)> {
        if let Some(secret) = self
            .store
            .as_ref()
            .and_then(|s| s.get(store_key))
            .and_then(Secret::new)
        {
            return Ok((secret, CredentialSource::SecretStore));
        }

        if let Some(secret) = (self.env)(env_var).and_then(Secret::new) {
            return Ok((secret, CredentialSource::Environment));
        }

        Err(missing(store_key, env_var))
    }

    /// Resolve the language-model API key.
    pub fn openai_key(&self) -> Result<Secret> {
        self.lookup(OPENAI_STORE_KEY, OPENAI_ENV_VAR).map(|(s, _)| s)
    }

    /// Resolve the NASA API key.
    pub fn nasa_key(&self) -> Result<Secret> {
        self.lookup(NASA_STORE_KEY, NASA_ENV_VAR).map(|(s, _)| s)
    }

    /// Resolve both credentials.
    pub fn load(&self) -> Result<Credentials> {
        Ok(Credentials {
            openai_api_key: self.openai_key()?,
            nasa_api_key: self.nasa_key()?,
        })
    }
}

fn missing(store_key: &str, env_var: &str) -> StargazerError {
    StargazerError::MissingCredential {
        store_key: store_key.to_string(),
        env_var: env_var.to_string(),
    }
}
