//! Investigation Agent
//!
//! The reasoning loop, the per-alert orchestrator, and the diagnostic tools
//! offered to the model.

pub mod investigator;
pub mod runtime;
pub mod templates;
pub mod tools;

pub use investigator::{InvestigationReport, Investigator};
pub use runtime::{
    AgentState, LoopObserver, LoopOutcome, LoopRun, LoopState, NoopObserver, ReasoningLoop,
    TracingObserver, DEFAULT_MAX_TURNS,
};
pub use tools::{Tool, ToolError, ToolRegistry};
