//! Tool definitions and implementations for the agent system.

use crate::apod::{parse_date, ApodClient};
use crate::error::{Result, StargazerError};
use crate::llm::ToolSpec;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// A named, described, callable unit the model may choose to invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call the tool.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema for the arguments object.
    fn parameters(&self) -> serde_json::Value;

    /// Run the tool with the model's raw JSON arguments.
    ///
    /// Argument problems are reported as [`StargazerError::ToolArguments`] or
    /// [`StargazerError::InvalidDate`]; everything else is an execution error.
    async fn invoke(&self, arguments: &str) -> Result<String>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Ordered set of tools available to an agent.
#[derive(Default, Clone)]
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool descriptions to send to the model.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Dispatch a call by name.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| StargazerError::UnknownTool(name.to_string()))?;
        tool.invoke(arguments).await
    }
}

/// Name of the APOD tool as seen by the model.
pub const APOD_TOOL_NAME: &str = "astronomy_picture_of_the_day";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApodArgs {
    #[serde(default)]
    date: Option<String>,
}

/// Exposes [`ApodClient`] to the agent.
pub struct ApodTool {
    client: ApodClient,
}

impl ApodTool {
    pub fn new(client: ApodClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ApodTool {
    fn name(&self) -> &str {
        APOD_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Get NASA's Astronomy Picture of the Day: the media URL, title, explanation \
        and date. Defaults to today's entry."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "date": {
                    "type": "string",
                    "description": "Date of the entry in YYYY-MM-DD format (default: today)"
                }
            },
            "additionalProperties": false
        })
    }

    async fn invoke(&self, arguments: &str) -> Result<String> {
        let args: ApodArgs = if arguments.trim().is_empty() {
            ApodArgs::default()
        } else {
            serde_json::from_str(arguments)
                .map_err(|e| StargazerError::ToolArguments(e.to_string()))?
        };

        let date = args
            .date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(parse_date)
            .transpose()?;

        let record = self.client.fetch(date).await?;
        Ok(serde_json::to_string_pretty(&record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApodSettings, Secret};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the arguments"
        }

        fn parameters(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }

        async fn invoke(&self, arguments: &str) -> Result<String> {
            Ok(arguments.to_string())
        }
    }

    fn offline_apod_tool() -> ApodTool {
        let settings = ApodSettings {
            base_url: "http://127.0.0.1:9/apod".to_string(),
            ..ApodSettings::default()
        };
        ApodTool::new(ApodClient::new(Secret::new("DEMO_KEY").unwrap(), &settings).unwrap())
    }

    #[tokio::test]
    async fn test_tool_set_dispatch() {
        let tools = ToolSet::new().with(Arc::new(EchoTool));
        assert_eq!(tools.execute("echo", "{\"a\":1}").await.unwrap(), "{\"a\":1}");
        assert!(matches!(
            tools.execute("nope", "{}").await,
            Err(StargazerError::UnknownTool(_))
        ));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut tools = ToolSet::new();
        tools.register(Arc::new(EchoTool));
        tools.register(Arc::new(EchoTool));
        assert_eq!(tools.len(), 1);
        assert_eq!(tools.names(), vec!["echo"]);
    }

    #[test]
    fn test_apod_spec() {
        let spec = offline_apod_tool().spec();
        assert_eq!(spec.name, APOD_TOOL_NAME);
        assert!(spec.parameters["properties"]["date"].is_object());
    }

    #[tokio::test]
    async fn test_apod_rejects_bad_arguments_before_fetching() {
        let tool = offline_apod_tool();

        let err = tool.invoke("not json").await.unwrap_err();
        assert!(err.is_tool_parse_error());

        let err = tool.invoke(r#"{"count": 3}"#).await.unwrap_err();
        assert!(err.is_tool_parse_error());

        let err = tool.invoke(r#"{"date": "yesterday"}"#).await.unwrap_err();
        assert!(matches!(err, StargazerError::InvalidDate(_)));
    }
}
