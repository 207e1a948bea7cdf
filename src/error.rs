//! Error types for Stargazer.

use thiserror::Error;

/// Library-level error type for Stargazer operations.
#[derive(Error, Debug)]
pub enum StargazerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: set '{store_key}' in the secret store or the {env_var} environment variable")]
    MissingCredential { store_key: String, env_var: String },

    #[error("Secret store unavailable: {0}")]
    SecretStore(String),

    #[error("APOD API returned {status}: {message}")]
    Apod { status: u16, message: String },

    #[error("Malformed APOD response: {0}")]
    ApodPayload(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    ToolArguments(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

impl StargazerError {
    /// Whether this error came from interpreting a model's tool call
    /// rather than from running the tool.
    pub fn is_tool_parse_error(&self) -> bool {
        matches!(
            self,
            StargazerError::UnknownTool(_)
                | StargazerError::ToolArguments(_)
                | StargazerError::InvalidDate(_)
        )
    }
}

/// Result type alias for Stargazer operations.
pub type Result<T> = std::result::Result<T, StargazerError>;
