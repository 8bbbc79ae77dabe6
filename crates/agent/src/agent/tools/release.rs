//! Release Info Tool
//!
//! Reports the most recent deployment. Fixed record standing in for a CI/CD
//! system lookup.

use anyhow::Result;
use async_trait::async_trait;

use super::{string_parameter_schema, Tool};

pub struct ReleaseInfoTool;

impl ReleaseInfoTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReleaseInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReleaseInfoTool {
    fn name(&self) -> &str {
        "get_release_info"
    }

    fn description(&self) -> &str {
        "Fetch information about the most recent deployment."
    }

    fn parameters(&self) -> serde_json::Value {
        string_parameter_schema("alert_timestamp", "Timestamp when the alert fired")
    }

    async fn invoke(&self, _arguments: &serde_json::Value) -> Result<String> {
        Ok("Deployment v2.0 occurred 5 minutes ago. Changes included an \
            update to the user profile page and new routing logic."
            .to_string())
    }
}
