//! LLM Completion Layer
//!
//! Conversation types and the completion client used by the reasoning loop.

pub mod client;
pub mod mock;
pub mod types;

pub use client::{CompletionClient, CompletionError, HttpCompletionClient};
pub use mock::MockCompletionClient;
pub use types::{AssistantTurn, ToolCall, ToolDefinition, Turn};
