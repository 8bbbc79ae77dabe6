//! Conversation Types
//!
//! The turn history exchanged with the model during an investigation.

use serde::{Deserialize, Serialize};

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back on the matching result turn.
    pub id: String,
    /// Name of the registered tool to invoke.
    pub name: String,
    /// Parsed argument object (parameter name -> value).
    pub arguments: serde_json::Value,
}

/// One assistant response: free text, tool calls, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssistantTurn {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantTurn {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// True when the model declared no further tool calls, i.e. the loop is done.
    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// One entry in the ordered, append-only conversation of an investigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    User {
        content: String,
    },
    Assistant(AssistantTurn),
    /// Outcome of a single tool call, fed back for the next reasoning step.
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        content: String,
    },
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Turn::User {
            content: content.into(),
        }
    }

    pub fn tool_result(
        call: &ToolCall,
        content: impl Into<String>,
    ) -> Self {
        Turn::ToolResult {
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
            content: content.into(),
        }
    }
}

/// A tool offered to the model: name, description and JSON schema of its
/// parameters, as served by the registry catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_turn_without_tool_calls_is_final() {
        let turn = AssistantTurn::text("all done");
        assert!(turn.is_final());
    }

    #[test]
    fn assistant_turn_with_tool_calls_is_not_final() {
        let turn = AssistantTurn {
            content: None,
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                name: "check_known_issues".to_string(),
                arguments: json!({"alert_summary": "Known Warning"}),
            }],
        };
        assert!(!turn.is_final());
    }

    #[test]
    fn tool_result_echoes_call_id_and_name() {
        let call = ToolCall {
            id: "call_42".to_string(),
            name: "get_release_info".to_string(),
            arguments: json!({}),
        };
        match Turn::tool_result(&call, "v2.0 deployed") {
            Turn::ToolResult {
                tool_call_id,
                tool_name,
                content,
            } => {
                assert_eq!(tool_call_id, "call_42");
                assert_eq!(tool_name, "get_release_info");
                assert_eq!(content, "v2.0 deployed");
            }
            other => panic!("unexpected turn: {:?}", other),
        }
    }
}
