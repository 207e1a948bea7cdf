//! Configuration settings for Stargazer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub apod: ApodSettings,
    pub agent: AgentSettings,
    pub secrets: SecretsSettings,
}

/// Chat model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-2024-08-06".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Astronomy Picture of the Day API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApodSettings {
    /// Endpoint URL (without query string).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Ask the API for a thumbnail URL when the media is a video.
    pub thumbs: bool,
}

impl Default for ApodSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov/planetary/apod".to_string(),
            timeout_secs: 30,
            thumbs: true,
        }
    }
}

/// Strategy the agent uses to talk to tools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AgentStrategy {
    /// The model names a tool and its JSON arguments in a structured field.
    #[default]
    FunctionCalling,
}

impl std::str::FromStr for AgentStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function-calling" | "function_calling" | "openai-functions" => {
                Ok(AgentStrategy::FunctionCalling)
            }
            _ => Err(format!("Unknown agent strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for AgentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStrategy::FunctionCalling => write!(f, "function-calling"),
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub strategy: AgentStrategy,
    /// Maximum number of model calls per run.
    pub max_iterations: usize,
    /// Feed malformed tool calls back to the model instead of aborting.
    pub handle_parsing_errors: bool,
    /// Log every intermediate step at info level.
    pub verbose: bool,
    /// Overrides the built-in system prompt.
    pub system_prompt: Option<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            strategy: AgentStrategy::FunctionCalling,
            max_iterations: 10,
            handle_parsing_errors: true,
            verbose: true,
            system_prompt: None,
        }
    }
}

/// Secret store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsSettings {
    /// Path to the TOML secrets file.
    pub path: String,
}

impl Default for SecretsSettings {
    fn default() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stargazer")
            .join("secrets.toml");
        Self {
            path: path.to_string_lossy().into_owned(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = Self::config_path(path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    /// The config file in effect: `path` expanded, or the default location.
    pub fn config_path(path: Option<&PathBuf>) -> PathBuf {
        match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        }
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stargazer")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded secrets file path.
    pub fn secrets_path(&self) -> PathBuf {
        Self::expand_path(&self.secrets.path)
    }
}
