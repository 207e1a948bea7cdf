mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{answer_for, credentials, sample_record, settings_for, spawn_apod, spawn_chat};
use serde_json::Value;
use stargazer::agent::APOD_TOOL_NAME;
use stargazer::config::{CredentialLoader, Settings};
use stargazer::llm::{ChatMessage, ChatModel, ModelReply, ToolInvocation, ToolSpec};
use stargazer::orchestrator::{Orchestrator, DEFAULT_QUERY};
use stargazer::{Result, StargazerError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn default_query_through_openai_binding() {
    let apod = spawn_apod(StatusCode::OK, sample_record()).await;
    let chat = spawn_chat().await;
    let settings = settings_for(&apod.base_url(), &chat.api_base());

    let orchestrator = Orchestrator::new(&settings, &credentials()).unwrap();
    let response = orchestrator.ask(DEFAULT_QUERY).await.unwrap();

    assert_eq!(apod.hits(), 1);
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].name, APOD_TOOL_NAME);
    assert_eq!(response.iterations, 2);
    assert_eq!(response.content, answer_for(&sample_record()));

    let requests = chat.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["model"], "gpt-4o-2024-08-06");
    assert_eq!(requests[0]["tools"][0]["function"]["name"], APOD_TOOL_NAME);
    assert!(requests[0]["messages"].to_string().contains(DEFAULT_QUERY));
    assert!(requests[1]["messages"].to_string().contains("Horsehead"));
}

/// Calls the APOD tool once, then summarizes whatever it returned.
struct SummarizingModel {
    calls: AtomicUsize,
}

#[async_trait]
impl ChatModel for SummarizingModel {
    fn model(&self) -> &str {
        "summarizer"
    }

    async fn complete(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let tool_output = messages.iter().rev().find_map(|m| match m {
            ChatMessage::Tool { content, .. } => Some(content.clone()),
            _ => None,
        });

        match tool_output {
            Some(content) => {
                let record: Value = serde_json::from_str(&content)?;
                Ok(ModelReply::text(answer_for(&record)))
            }
            None => Ok(ModelReply::calls(vec![ToolInvocation {
                id: "call_1".to_string(),
                name: tools[0].name.clone(),
                arguments: "{}".to_string(),
            }])),
        }
    }
}

#[tokio::test]
async fn default_query_with_custom_model() {
    let apod = spawn_apod(StatusCode::OK, sample_record()).await;
    let settings = settings_for(&apod.base_url(), "http://127.0.0.1:9/v1");
    let model = Arc::new(SummarizingModel {
        calls: AtomicUsize::new(0),
    });

    let orchestrator = Orchestrator::with_model(&settings, &credentials(), model.clone()).unwrap();
    let response = orchestrator.ask(DEFAULT_QUERY).await.unwrap();

    assert_eq!(apod.hits(), 1);
    assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    assert!(response.content.contains("The Horsehead Nebula"));
    assert!(response.content.contains("dark cloud of dust"));
}

#[tokio::test]
async fn api_failure_reaches_the_model() {
    let apod = spawn_apod(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({"code": 500, "msg": "Internal Service Error"}),
    )
    .await;
    let chat = spawn_chat().await;
    let settings = settings_for(&apod.base_url(), &chat.api_base());

    let orchestrator = Orchestrator::new(&settings, &credentials()).unwrap();
    let err = orchestrator.ask(DEFAULT_QUERY).await;

    // The mock model only answers once it sees a JSON tool result, so a
    // reported failure keeps it calling the tool until the iteration limit.
    assert!(matches!(err, Err(StargazerError::Agent(_))));
    assert_eq!(apod.hits(), Settings::default().agent.max_iterations);

    let requests = chat.requests();
    let last = requests.last().unwrap();
    assert!(last["messages"].to_string().contains("Tool error"));
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
    let apod = spawn_apod(StatusCode::OK, sample_record()).await;
    let chat = spawn_chat().await;

    let loader = CredentialLoader::new(None, |name| {
        (name == "OPENAI_API_KEY").then(|| "sk-test".to_string())
    });

    assert!(matches!(
        loader.load(),
        Err(StargazerError::MissingCredential { .. })
    ));
    assert_eq!(apod.hits(), 0);
    assert!(chat.requests().is_empty());
}

#[tokio::test]
async fn construction_makes_no_requests() {
    let apod = spawn_apod(StatusCode::OK, sample_record()).await;
    let chat = spawn_chat().await;
    let settings = settings_for(&apod.base_url(), &chat.api_base());

    let _orchestrator = Orchestrator::new(&settings, &credentials()).unwrap();

    assert_eq!(apod.hits(), 0);
    assert!(chat.requests().is_empty());
}
