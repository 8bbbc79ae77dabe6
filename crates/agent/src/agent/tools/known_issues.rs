//! Known Issues Tool
//!
//! Checks whether an alert matches a known, non-critical issue. Backed by a
//! fixed warning list; a real deployment would query an issue tracker.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{string_parameter_schema, Tool};

const KNOWN_WARNINGS: &[&str] = &[
    "The 'custom_feature_flag' is not set",
    "Known Warning",
];

pub struct KnownIssuesTool;

impl KnownIssuesTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KnownIssuesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for KnownIssuesTool {
    fn name(&self) -> &str {
        "check_known_issues"
    }

    fn description(&self) -> &str {
        "Check whether the alert corresponds to a known, non-critical issue."
    }

    fn parameters(&self) -> serde_json::Value {
        string_parameter_schema("alert_summary", "The summary text from the alert")
    }

    async fn invoke(&self, arguments: &serde_json::Value) -> Result<String> {
        let summary = arguments["alert_summary"].as_str().unwrap_or_default();

        for warning in KNOWN_WARNINGS {
            if summary.contains(warning) {
                debug!(warning, "matched known issue");
                return Ok("This is a known, non-critical issue. No immediate \
                           action is required."
                    .to_string());
            }
        }

        Ok("This does not appear to be a known issue.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn known_warning_is_reported_as_non_critical() {
        let tool = KnownIssuesTool::new();
        let result = tool
            .invoke(&json!({"alert_summary": "Known Warning - feature flag"}))
            .await
            .unwrap();
        assert!(result.contains("known, non-critical"));
    }

    #[tokio::test]
    async fn unmatched_summary_is_not_a_known_issue() {
        let tool = KnownIssuesTool::new();
        let result = tool
            .invoke(&json!({"alert_summary": "PHP fatal error on /broken"}))
            .await
            .unwrap();
        assert_eq!(result, "This does not appear to be a known issue.");
    }
}
