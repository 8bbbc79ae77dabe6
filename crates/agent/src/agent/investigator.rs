//! Investigator
//!
//! Orchestrates one investigation per alert: seeds the reasoning loop, runs
//! it to termination, then asks for a final summary. Never fails outward;
//! the alert notifier always gets something renderable.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use super::runtime::{LoopObserver, LoopOutcome, NoopObserver, ReasoningLoop, DEFAULT_MAX_TURNS};
use super::templates;
use super::tools::ToolRegistry;
use crate::llm::{CompletionClient, CompletionError, Turn};
use crate::metrics;
use crate::sources::AlertData;

/// Outcome of one investigation.
#[derive(Debug, Clone)]
pub struct InvestigationReport {
    pub id: Uuid,
    pub summary: String,
    /// False when the loop was cut off by the turn budget or the
    /// investigation degraded on an error.
    pub converged: bool,
    pub tool_invocations: usize,
}

pub struct Investigator {
    client: Arc<dyn CompletionClient>,
    registry: Arc<ToolRegistry>,
    max_turns: u32,
    observer: Arc<dyn LoopObserver>,
}

impl Investigator {
    pub fn new(client: Arc<dyn CompletionClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            client,
            registry,
            max_turns: DEFAULT_MAX_TURNS,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn LoopObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Investigate one alert and produce its summary.
    ///
    /// Internal failures are converted into a degraded summary string, so
    /// every alert yields exactly one report.
    pub async fn run(&self, alert: &AlertData) -> InvestigationReport {
        let id = Uuid::new_v4();
        info!(investigation = %id, summary = %alert.summary, "starting investigation");

        match self.investigate(alert).await {
            Ok(report) => {
                info!(
                    investigation = %id,
                    converged = report.converged,
                    tool_invocations = report.tool_invocations,
                    "investigation completed"
                );
                InvestigationReport { id, ..report }
            }
            Err(err) => {
                error!(investigation = %id, error = %err, "investigation failed");
                metrics::INVESTIGATIONS_FAILED_TOTAL.inc();
                InvestigationReport {
                    id,
                    summary: format!("Investigation failed due to error: {err}"),
                    converged: false,
                    tool_invocations: 0,
                }
            }
        }
    }

    async fn investigate(
        &self,
        alert: &AlertData,
    ) -> Result<InvestigationReport, CompletionError> {
        let seed = Turn::user(templates::investigation_prompt(alert));

        let run = ReasoningLoop::new(self.client.clone(), self.registry.clone())
            .with_max_turns(self.max_turns)
            .with_observer(self.observer.clone())
            .run(seed)
            .await?;
        metrics::TOOL_CALLS_TOTAL.inc_by(run.tool_invocations as u64);

        let converged = run.outcome == LoopOutcome::Converged;
        let summary_prompt = if converged {
            templates::SUMMARY_PROMPT
        } else {
            templates::PARTIAL_SUMMARY_PROMPT
        };

        let mut conversation = run.conversation;
        conversation.push(Turn::user(summary_prompt));

        // No tools offered on the summarization call.
        let final_turn = self.client.complete(&conversation, &[]).await?;
        let summary = final_turn
            .content
            .unwrap_or_else(|| "Investigation produced no summary.".to_string());

        Ok(InvestigationReport {
            id: Uuid::nil(),
            summary,
            converged,
            tool_invocations: run.tool_invocations,
        })
    }
}
