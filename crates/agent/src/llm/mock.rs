//! Mock Completion Client
//!
//! Deterministic scripted client for demos and tests. Plays the role of the
//! model: first checks known issues, then walks the release/code-change
//! trail when the alert is not a known issue, and finally summarizes.

use async_trait::async_trait;
use serde_json::json;

use super::client::{CompletionClient, CompletionError};
use super::types::{AssistantTurn, ToolCall, ToolDefinition, Turn};

pub struct MockCompletionClient;

impl MockCompletionClient {
    pub fn new() -> Self {
        Self
    }

    fn call_id(conversation: &[Turn]) -> String {
        let assistant_turns = conversation
            .iter()
            .filter(|t| matches!(t, Turn::Assistant(_)))
            .count();
        format!("call_{}", assistant_turns + 1)
    }

    /// Pull a field out of the seed prompt, e.g. `- Summary: ...`.
    fn seed_field(conversation: &[Turn], label: &str) -> String {
        let Some(Turn::User { content }) = conversation.first() else {
            return "N/A".to_string();
        };
        content
            .lines()
            .find_map(|line| line.trim().strip_prefix(label))
            .map(|rest| rest.trim().to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    fn last_tool_result(conversation: &[Turn]) -> Option<&str> {
        conversation.iter().rev().find_map(|turn| match turn {
            Turn::ToolResult { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    fn summarize(conversation: &[Turn]) -> String {
        let findings: Vec<&str> = conversation
            .iter()
            .filter_map(|turn| match turn {
                Turn::ToolResult { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();

        if findings.iter().any(|f| f.contains("known, non-critical")) {
            return "The alert corresponds to a known, non-critical issue \
                    (an unset feature flag warning). No immediate action is \
                    required; the alert can be acknowledged."
                .to_string();
        }
        if findings.iter().any(|f| f.contains("does_not_exist")) {
            return "Root cause: release v2.0 introduced a call to the \
                    undefined function `does_not_exist()` on the `/broken` \
                    route. Recommended action: roll back to v1.0 or ship a \
                    hotfix defining the function."
                .to_string();
        }
        "Unable to determine a root cause from the gathered evidence. \
         Manual investigation is required."
            .to_string()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
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

        // The summarization call offers no tools and expects prose.
        if tools.is_empty() {
            return Ok(AssistantTurn::text(Self::summarize(conversation)));
        }

        let Some(result) = Self::last_tool_result(conversation) else {
            // First reasoning step: check for known issues, as instructed.
            return Ok(AssistantTurn {
                content: None,
                tool_calls: vec![ToolCall {
                    id: Self::call_id(conversation),
                    name: "check_known_issues".to_string(),
                    arguments: json!({
                        "alert_summary": Self::seed_field(conversation, "- Summary:")
                    }),
                }],
            });
        };

        if result.contains("known, non-critical") {
            return Ok(AssistantTurn::text(
                "This is a known, non-critical issue; no further \
                 investigation is needed.",
            ));
        }
        if result.contains("does not appear to be a known issue") {
            return Ok(AssistantTurn {
                content: None,
                tool_calls: vec![ToolCall {
                    id: Self::call_id(conversation),
                    name: "get_release_info".to_string(),
                    arguments: json!({
                        "alert_timestamp": Self::seed_field(conversation, "- Starts at:")
                    }),
                }],
            });
        }
        if result.contains("Deployment v2.0") {
            return Ok(AssistantTurn {
                content: None,
                tool_calls: vec![ToolCall {
                    id: Self::call_id(conversation),
                    name: "analyze_code_changes".to_string(),
                    arguments: json!({"release_version": "v2.0"}),
                }],
            });
        }
        if result.contains("does_not_exist") {
            return Ok(AssistantTurn::text(
                "The evidence points at the undefined function introduced \
                 in v2.0; concluding the investigation.",
            ));
        }

        // Tool errors or unrecognized findings end the investigation.
        Ok(AssistantTurn::text(
            "No further diagnostic steps available; concluding.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Turn {
        Turn::user(
            "An alert has just fired with the following details:\n\
             - Summary: PHP fatal error on /broken\n\
             - Description: A fatal error was detected\n\
             - Status: firing\n\
             - Starts at: 2025-09-21T12:00:00Z\n",
        )
    }

    fn catalog() -> Vec<ToolDefinition> {
        vec![ToolDefinition {
            name: "check_known_issues".to_string(),
            description: String::new(),
            parameters: serde_json::json!({}),
        }]
    }

    #[tokio::test]
    async fn first_step_checks_known_issues_with_alert_summary() {
        let client = MockCompletionClient::new();
        let turn = client.complete(&[seed()], &catalog()).await.unwrap();
        assert_eq!(turn.tool_calls.len(), 1);
        assert_eq!(turn.tool_calls[0].name, "check_known_issues");
        assert_eq!(
            turn.tool_calls[0].arguments["alert_summary"],
            "PHP fatal error on /broken"
        );
    }

    #[tokio::test]
    async fn known_issue_result_stops_the_loop() {
        let client = MockCompletionClient::new();
        let conversation = vec![
            seed(),
            Turn::ToolResult {
                tool_call_id: "call_1".to_string(),
                tool_name: "check_known_issues".to_string(),
                content: "This is a known, non-critical issue. No immediate \
                          action is required."
                    .to_string(),
            },
        ];
        let turn = client.complete(&conversation, &catalog()).await.unwrap();
        assert!(turn.is_final());
    }

    #[tokio::test]
    async fn summarization_call_returns_prose() {
        let client = MockCompletionClient::new();
        let conversation = vec![seed(), Turn::user("Summarize your investigation.")];
        let turn = client.complete(&conversation, &[]).await.unwrap();
        assert!(turn.is_final());
        assert!(turn.content.is_some());
    }
}
