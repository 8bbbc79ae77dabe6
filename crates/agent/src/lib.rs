pub mod agent;
pub mod config;
pub mod llm;
pub mod metrics;
pub mod server;
pub mod sinks;
pub mod sources;

use thiserror::Error;

use crate::agent::tools::ToolError;
use crate::llm::CompletionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
