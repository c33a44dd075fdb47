//! Orchestration outputs.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::AgentAction;
use crate::analysis::Modality;

/// Final output of one agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrchestrationResult {
    /// Final narrative (refined when refinement ran and succeeded)
    pub summary: String,

    /// Score of the draft, in `[0, 1]`
    pub quality_score: f64,

    /// Modalities that produced a record, in canonical order
    pub analysis_steps_completed: Vec<Modality>,

    /// Trace over the most recent log actions
    pub agent_reasoning: String,

    pub execution_time: DateTime<Utc>,

    /// Whether refinement was attempted
    #[serde(default)]
    pub refined: bool,
}

/// Snapshot of an agent's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AgentStatus {
    pub agent_id: String,
    pub actions_taken: usize,
    pub cached_analyses: Vec<Modality>,
    pub has_plan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_action: Option<AgentAction>,
}
