//! Wiring for Stargazer.
//!
//! Builds the APOD tool, the chat model and the agent from settings and a
//! credential pair. Construction performs no network I/O.

use crate::agent::{Agent, AgentResponse, ApodTool, ToolSet};
use crate::apod::ApodClient;
use crate::config::{Credentials, Settings};
use crate::error::Result;
use crate::llm::{ChatModel, OpenAIChat};
use std::sync::Arc;
use tracing::{info, instrument};

/// Query used when the user does not supply one.
pub const DEFAULT_QUERY: &str = "What is the Astronomy Photo of the Day?";

/// Owns the components of one agent session.
pub struct Orchestrator {
    agent: Agent,
}

impl Orchestrator {
    /// Create an orchestrator backed by the configured OpenAI endpoint.
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        Self::with_model_override(settings, credentials, None)
    }

    /// Like [`Orchestrator::new`], optionally replacing the configured model name.
    pub fn with_model_override(
        settings: &Settings,
        credentials: &Credentials,
        model: Option<&str>,
    ) -> Result<Self> {
        let mut chat = OpenAIChat::new(&credentials.openai_api_key, &settings.llm)?;
        if let Some(model) = model {
            chat = chat.with_model(model);
        }
        info!("Using model {} at {}", chat.model(), settings.llm.api_base);

        Self::with_model(settings, credentials, Arc::new(chat))
    }

    /// Create an orchestrator with a custom chat model.
    pub fn with_model(
        settings: &Settings,
        credentials: &Credentials,
        model: Arc<dyn ChatModel>,
    ) -> Result<Self> {
        let apod = ApodClient::new(credentials.nasa_api_key.clone(), &settings.apod)?;
        let tools = ToolSet::new().with(Arc::new(ApodTool::new(apod)));
        let agent = Agent::with_settings(model, tools, &settings.agent);

        Ok(Self { agent })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Run a natural-language query through the agent.
    #[instrument(skip(self))]
    pub async fn ask(&self, query: &str) -> Result<AgentResponse> {
        self.agent.run(query).await
    }
}
