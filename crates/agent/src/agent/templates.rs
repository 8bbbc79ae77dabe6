//! Prompt Templates
//!
//! Fixed prompts used to seed and conclude an investigation.

use crate::sources::AlertData;

/// Seed prompt for a new investigation.
pub fn investigation_prompt(alert: &AlertData) -> String {
    format!(
        "You are an expert AI assistant called VibeDebugger.\n\
         Your task is to investigate and diagnose production alerts.\n\n\
         An alert has just fired with the following details:\n\
         - Summary: {}\n\
         - Description: {}\n\
         - Status: {}\n\
         - Starts at: {}\n\n\
         Begin your investigation. First, check if this is a known issue.",
        alert.summary, alert.description, alert.status, alert.starts_at
    )
}

/// Final user turn asking for the investigation summary.
pub const SUMMARY_PROMPT: &str =
    "Summarize your investigation, state the root cause, and recommend a \
     course of action (e.g., rollback, hotfix).";

/// Variant of [`SUMMARY_PROMPT`] used when the turn budget cut the
/// investigation short.
pub const PARTIAL_SUMMARY_PROMPT: &str =
    "The investigation was stopped before completion because the turn budget \
     was exhausted. Summarize the partial findings so far, state the most \
     likely root cause if one is apparent, and recommend a course of action \
     (e.g., rollback, hotfix, or manual investigation).";
