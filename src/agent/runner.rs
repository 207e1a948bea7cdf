//! Agent runner with tool calling loop.

use super::tools::ToolSet;
use crate::config::{AgentSettings, AgentStrategy};
use crate::error::{Result, StargazerError};
use crate::llm::{ChatMessage, ChatModel, ToolInvocation};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default system prompt for the agent.
const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful assistant with access to NASA's Astronomy Picture of the Day.

Use the 'astronomy_picture_of_the_day' tool whenever the user asks about the astronomy picture or photo of the day.
Only pass a date when the user asks about a specific day.

When you have the tool result, answer with the title, a short summary of the explanation, and the media URL.
If the tool reports an error, tell the user what went wrong instead of guessing."#;

/// Agent that pairs a chat model with a set of tools.
pub struct Agent {
    model: Arc<dyn ChatModel>,
    tools: ToolSet,
    strategy: AgentStrategy,
    max_iterations: usize,
    handle_parsing_errors: bool,
    verbose: bool,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with default settings.
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolSet) -> Self {
        Self::with_settings(model, tools, &AgentSettings::default())
    }

    /// Create a new agent from configuration.
    pub fn with_settings(model: Arc<dyn ChatModel>, tools: ToolSet, settings: &AgentSettings) -> Self {
        Self {
            model,
            tools,
            strategy: settings.strategy,
            max_iterations: settings.max_iterations,
            handle_parsing_errors: settings.handle_parsing_errors,
            verbose: settings.verbose,
            system_prompt: settings
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Abort on malformed tool calls instead of reporting them to the model.
    pub fn with_handle_parsing_errors(mut self, handle: bool) -> Self {
        self.handle_parsing_errors = handle;
        self
    }

    pub fn strategy(&self) -> AgentStrategy {
        self.strategy
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Run the agent with a user query.
    pub async fn run(&self, query: &str) -> Result<AgentResponse> {
        if query.trim().is_empty() {
            return Err(StargazerError::InvalidInput("Query is empty".to_string()));
        }

        let mut messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(query),
        ];
        let specs = self.tools.specs();

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        self.step(&format!(
            "Running {} agent with model {} and {} tool(s)",
            self.strategy,
            self.model.model(),
            specs.len()
        ));

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(StargazerError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let reply = self.model.complete(&messages, &specs).await?;

            if !reply.wants_tools() {
                let content = reply.content.unwrap_or_default();
                self.step(&format!("Final answer after {} iteration(s)", iterations));
                return Ok(AgentResponse {
                    content,
                    tool_calls: tool_calls_made,
                    iterations,
                });
            }

            if let Some(thought) = reply.content.as_deref().filter(|c| !c.trim().is_empty()) {
                self.step(&format!("Model: {}", thought));
            }

            messages.push(ChatMessage::Assistant {
                content: reply.content.clone(),
                tool_calls: reply.tool_calls.clone(),
            });

            for call in &reply.tool_calls {
                let record = self.execute_tool_call(call).await?;
                messages.push(ChatMessage::tool(&call.id, record.result.clone()));
                tool_calls_made.push(record);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Only a parsing error with parsing-error handling disabled ends the run.
    async fn execute_tool_call(&self, call: &ToolInvocation) -> Result<ToolCallRecord> {
        self.step(&format!("Calling tool: {} with args: {}", call.name, call.arguments));

        let (result, is_error) = match self.tools.execute(&call.name, &call.arguments).await {
            Ok(output) => (output, false),
            Err(e) if e.is_tool_parse_error() => {
                if !self.handle_parsing_errors {
                    return Err(e);
                }
                warn!("Could not parse tool call {}: {}", call.name, e);
                (format!("Failed to parse tool call: {}", e), true)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", call.name, e);
                (format!("Tool error: {}", e), true)
            }
        };

        self.step(&format!("Tool {} returned {} bytes", call.name, result.len()));

        Ok(ToolCallRecord {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
            result,
            is_error,
        })
    }

    fn step(&self, message: &str) {
        if self.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool, or the error reported to the model.
    pub result: String,
    pub is_error: bool,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
