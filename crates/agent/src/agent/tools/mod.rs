//! Diagnostic Tools
//!
//! Tools the investigation agent can invoke, and the registry that validates
//! and dispatches model-requested calls by name.

pub mod code_changes;
pub mod known_issues;
pub mod release;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::llm::ToolDefinition;

pub use code_changes::CodeChangesTool;
pub use known_issues::KnownIssuesTool;
pub use release::ReleaseInfoTool;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
    #[error("tool {tool} failed: {source}")]
    Execution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },
}

/// A diagnostic tool: side-effect-free, fast, string in / string out.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Description offered to the model alongside the parameter schema.
    fn description(&self) -> &str;

    /// JSON schema of the parameter object (`type: object`).
    fn parameters(&self) -> serde_json::Value;

    async fn invoke(&self, arguments: &serde_json::Value) -> Result<String>;
}

/// Fixed mapping from tool name to implementation. Arguments are validated
/// against the declared schema before dispatch, so a call with the wrong
/// shape fails at the boundary rather than inside the tool.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard diagnostic tool set.
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(KnownIssuesTool::new()));
        registry.register(Arc::new(ReleaseInfoTool::new()));
        registry.register(Arc::new(CodeChangesTool::new()));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Catalog offered to the completion client, in stable name order.
    pub fn catalog(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub async fn invoke(
        &self,
        name: &str,
        arguments: &serde_json::Value,
    ) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        validate_arguments(name, &tool.parameters(), arguments)?;

        info!(tool = name, "invoking diagnostic tool");
        tool.invoke(arguments)
            .await
            .map_err(|source| ToolError::Execution {
                tool: name.to_string(),
                source,
            })
    }
}

/// Check an argument object against a tool's parameter schema: required keys
/// must be present, and declared string parameters must be strings.
fn validate_arguments(
    tool: &str,
    schema: &serde_json::Value,
    arguments: &serde_json::Value,
) -> Result<(), ToolError> {
    let invalid = |reason: String| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason,
    };

    let args = arguments
        .as_object()
        .ok_or_else(|| invalid("arguments must be an object".to_string()))?;

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for key in required.iter().filter_map(|k| k.as_str()) {
            if !args.contains_key(key) {
                return Err(invalid(format!("missing required parameter `{key}`")));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) {
        for (key, spec) in properties {
            let Some(value) = args.get(key) else { continue };
            if spec.get("type").and_then(|t| t.as_str()) == Some("string")
                && !value.is_string()
            {
                return Err(invalid(format!("parameter `{key}` must be a string")));
            }
        }
    }

    Ok(())
}

/// Schema for the common single-string-parameter tool shape.
pub(crate) fn string_parameter_schema(name: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            name: {
                "type": "string",
                "description": description,
            }
        },
        "required": [name],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_tool_is_a_typed_error() {
        let registry = ToolRegistry::with_default_tools();
        let err = registry.invoke("reboot_production", &json!({})).await;
        assert!(matches!(err, Err(ToolError::UnknownTool(name)) if name == "reboot_production"));
    }

    #[tokio::test]
    async fn missing_required_parameter_is_rejected_before_dispatch() {
        let registry = ToolRegistry::with_default_tools();
        let err = registry.invoke("check_known_issues", &json!({})).await;
        match err {
            Err(ToolError::InvalidArguments { tool, reason }) => {
                assert_eq!(tool, "check_known_issues");
                assert!(reason.contains("alert_summary"));
            }
            other => panic!("expected InvalidArguments, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn mistyped_parameter_is_rejected() {
        let registry = ToolRegistry::with_default_tools();
        let err = registry
            .invoke("check_known_issues", &json!({"alert_summary": 42}))
            .await;
        assert!(matches!(err, Err(ToolError::InvalidArguments { .. })));
    }

    #[test]
    fn catalog_lists_tools_in_stable_order() {
        let registry = ToolRegistry::with_default_tools();
        let names: Vec<String> = registry.catalog().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "analyze_code_changes",
                "check_known_issues",
                "get_release_info"
            ]
        );
    }
}
