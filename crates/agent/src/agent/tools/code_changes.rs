//! Code Changes Tool
//!
//! Analyzes the changes shipped in a release version. Fixed finding standing
//! in for a version-control diff analysis.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{string_parameter_schema, Tool};

pub struct CodeChangesTool;

impl CodeChangesTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CodeChangesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CodeChangesTool {
    fn name(&self) -> &str {
        "analyze_code_changes"
    }

    fn description(&self) -> &str {
        "Analyze the code changes included in the given release version."
    }

    fn parameters(&self) -> serde_json::Value {
        string_parameter_schema("release_version", "The release to analyze, e.g. \"v2.0\"")
    }

    async fn invoke(&self, arguments: &serde_json::Value) -> Result<String> {
        let version = arguments["release_version"].as_str().unwrap_or_default();
        debug!(version, "analyzing code changes");

        Ok("Code analysis reveals a call to an undefined function \
            `does_not_exist()` on the `/broken` route. This function was \
            introduced in v2.0 but never defined."
            .to_string())
    }
}
