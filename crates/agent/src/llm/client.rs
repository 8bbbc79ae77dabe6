//! Completion Client
//!
//! Wraps one model-completion call against an OpenAI-compatible
//! chat-completions endpoint (the completion gateway is configured by base
//! URL and model id, both opaque to this crate). Transport failures surface
//! as [`CompletionError`]; retry policy belongs to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::mock::MockCompletionClient;
use super::types::{AssistantTurn, ToolCall, ToolDefinition, Turn};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("auth failed: {0}")]
    Auth(String),
    #[error("rate limit: {0}")]
    RateLimit(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("parsing failed: {0}")]
    Parse(String),
    #[error("empty completion response")]
    EmptyResponse,
}

/// One completion call: full conversation plus the tool catalog in, a single
/// assistant turn out. Implementations must not retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        conversation: &[Turn],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, CompletionError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub api_base: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_base: "http://localhost:4000".to_string(),
            model: "gpt-4".to_string(),
            api_key: None,
            temperature: Some(0.7),
            max_tokens: None,
        }
    }
}

/// Create a client from configuration. `provider = "mock"` selects the
/// scripted client used for demos and tests.
pub fn create_client(config: &LlmConfig) -> Arc<dyn CompletionClient> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockCompletionClient::new()),
        _ => Arc::new(HttpCompletionClient::new(config.clone())),
    }
}

// Wire types for the chat-completions protocol. Assistant tool-call
// arguments travel as a JSON-encoded string, not an object.

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

fn to_wire_messages(conversation: &[Turn]) -> Vec<WireMessage> {
    conversation
        .iter()
        .map(|turn| match turn {
            Turn::User { content } => WireMessage {
                role: "user",
                content: Some(content.clone()),
                tool_calls: Vec::new(),
                tool_call_id: None,
            },
            Turn::Assistant(assistant) => WireMessage {
                role: "assistant",
                content: assistant.content.clone(),
                tool_calls: assistant
                    .tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        kind: "function".to_string(),
                        function: WireFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.to_string(),
                        },
                    })
                    .collect(),
                tool_call_id: None,
            },
            Turn::ToolResult {
                tool_call_id,
                content,
                ..
            } => WireMessage {
                role: "tool",
                content: Some(content.clone()),
                tool_calls: Vec::new(),
                tool_call_id: Some(tool_call_id.clone()),
            },
        })
        .collect()
}

fn from_wire_message(message: WireResponseMessage) -> AssistantTurn {
    let tool_calls = message
        .tool_calls
        .into_iter()
        .map(|call| ToolCall {
            id: call.id,
            name: call.function.name,
            // An unparseable argument payload degrades to an empty object;
            // registry validation reports the missing parameters to the model.
            arguments: serde_json::from_str(&call.function.arguments)
                .unwrap_or_else(|_| serde_json::json!({})),
        })
        .collect();
    AssistantTurn {
        content: message.content,
        tool_calls,
    }
}

pub struct HttpCompletionClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        conversation: &[Turn],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, CompletionError> {
        if conversation.is_empty() {
            return Err(CompletionError::InvalidRequest(
                "conversation must not be empty".to_string(),
            ));
        }

        let body = WireRequest {
            model: &self.config.model,
            messages: to_wire_messages(conversation),
            tools: tools
                .iter()
                .map(|def| WireTool {
                    kind: "function",
                    function: def,
                })
                .collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => CompletionError::Auth(text),
                429 => CompletionError::RateLimit(text),
                400..=499 => CompletionError::InvalidRequest(text),
                _ => CompletionError::Api(text),
            });
        }

        let parsed: WireResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::Parse(format!("{e}: {text}")))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyResponse)?;

        Ok(from_wire_message(choice.message))
    }
}
