//! Reasoning Loop
//!
//! The investigation state machine. Alternates model completions and tool
//! invocations over a growing conversation until the model declares no
//! further tool calls, or the turn budget runs out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::tools::ToolRegistry;
use crate::llm::{AssistantTurn, CompletionClient, CompletionError, ToolCall, Turn};

/// Maximum completion calls per investigation unless configured otherwise.
/// Keeps a model that never stops requesting tools from looping forever.
pub const DEFAULT_MAX_TURNS: u32 = 10;

/// Phase of one investigation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting on a model completion.
    Reasoning,
    /// Executing the tool calls declared by the last assistant turn.
    Acting,
    /// The model produced a turn with no tool calls.
    Done,
}

/// How a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The model stopped requesting tools on its own.
    Converged,
    /// The turn budget forced termination; findings may be partial.
    TurnLimitReached,
}

/// Working state of one run. Owned exclusively by the loop; each alert gets
/// an independent instance.
pub struct AgentState {
    pub conversation: Vec<Turn>,
    pub pending_tool_calls: Vec<ToolCall>,
}

/// Terminal conversation plus how it got there.
pub struct LoopRun {
    pub conversation: Vec<Turn>,
    pub outcome: LoopOutcome,
    pub tool_invocations: usize,
}

/// Observation hooks attached to a loop run. All methods default to no-ops.
pub trait LoopObserver: Send + Sync {
    fn on_assistant_turn(&self, _turn: &AssistantTurn) {}
    fn on_tool_result(&self, _call: &ToolCall, _result: &str) {}
    fn on_finish(&self, _outcome: LoopOutcome) {}
}

pub struct NoopObserver;

impl LoopObserver for NoopObserver {}

/// Observer that mirrors loop progress into the tracing log.
pub struct TracingObserver;

impl LoopObserver for TracingObserver {
    fn on_assistant_turn(&self, turn: &AssistantTurn) {
        debug!(
            tool_calls = turn.tool_calls.len(),
            has_text = turn.content.is_some(),
            "assistant turn"
        );
    }

    fn on_tool_result(&self, call: &ToolCall, result: &str) {
        debug!(tool = %call.name, result, "tool result");
    }

    fn on_finish(&self, outcome: LoopOutcome) {
        info!(?outcome, "reasoning loop finished");
    }
}

pub struct ReasoningLoop {
    client: Arc<dyn CompletionClient>,
    registry: Arc<ToolRegistry>,
    max_turns: u32,
    observer: Arc<dyn LoopObserver>,
}

impl ReasoningLoop {
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

    /// Run to termination from a seed user turn.
    ///
    /// Tool calls execute synchronously in declaration order; every call
    /// yields exactly one result turn before the next completion. A failed
    /// tool call becomes an error-marker result the model can react to. A
    /// transport failure aborts the run.
    pub async fn run(&self, seed: Turn) -> Result<LoopRun, CompletionError> {
        let mut state = AgentState {
            conversation: vec![seed],
            pending_tool_calls: Vec::new(),
        };
        let catalog = self.registry.catalog();
        let mut phase = LoopState::Reasoning;
        let mut completions: u32 = 0;
        let mut tool_invocations: usize = 0;

        let outcome = loop {
            match phase {
                LoopState::Reasoning => {
                    if completions >= self.max_turns {
                        warn!(
                            max_turns = self.max_turns,
                            "turn budget exhausted, forcing termination"
                        );
                        break LoopOutcome::TurnLimitReached;
                    }
                    completions += 1;

                    let assistant = self
                        .client
                        .complete(&state.conversation, &catalog)
                        .await?;
                    self.observer.on_assistant_turn(&assistant);

                    let done = assistant.is_final();
                    state.pending_tool_calls = assistant.tool_calls.clone();
                    state.conversation.push(Turn::Assistant(assistant));
                    phase = if done { LoopState::Done } else { LoopState::Acting };
                }
                LoopState::Acting => {
                    let calls = std::mem::take(&mut state.pending_tool_calls);
                    for call in calls {
                        let content = match self
                            .registry
                            .invoke(&call.name, &call.arguments)
                            .await
                        {
                            Ok(output) => output,
                            // Recoverable: the model sees the failure and
                            // decides how to proceed.
                            Err(err) => {
                                warn!(tool = %call.name, error = %err, "tool call failed");
                                format!("tool error: {err}")
                            }
                        };
                        tool_invocations += 1;
                        self.observer.on_tool_result(&call, &content);
                        state.conversation.push(Turn::tool_result(&call, content));
                    }
                    phase = LoopState::Reasoning;
                }
                LoopState::Done => break LoopOutcome::Converged,
            }
        };

        self.observer.on_finish(outcome);
        Ok(LoopRun {
            conversation: state.conversation,
            outcome,
            tool_invocations,
        })
    }
}
