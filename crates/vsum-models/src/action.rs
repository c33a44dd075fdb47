//! Agent action log entries.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of action recorded in an agent's session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentAction {
    Planning,
    PlanCreated,
    PlanError,
    ExecutionStart,
    VisualAnalysis,
    VisualError,
    AudioAnalysis,
    AudioError,
    MetadataAnalysis,
    Synthesis,
    ContentSynthesis,
    SynthesisError,
    QualityCheck,
    QualityAssessment,
    Refinement,
    SummaryRefinement,
    RefinementError,
    ExecutionComplete,
}

impl AgentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentAction::Planning => "PLANNING",
            AgentAction::PlanCreated => "PLAN_CREATED",
            AgentAction::PlanError => "PLAN_ERROR",
            AgentAction::ExecutionStart => "EXECUTION_START",
            AgentAction::VisualAnalysis => "VISUAL_ANALYSIS",
            AgentAction::VisualError => "VISUAL_ERROR",
            AgentAction::AudioAnalysis => "AUDIO_ANALYSIS",
            AgentAction::AudioError => "AUDIO_ERROR",
            AgentAction::MetadataAnalysis => "METADATA_ANALYSIS",
            AgentAction::Synthesis => "SYNTHESIS",
            AgentAction::ContentSynthesis => "CONTENT_SYNTHESIS",
            AgentAction::SynthesisError => "SYNTHESIS_ERROR",
            AgentAction::QualityCheck => "QUALITY_CHECK",
            AgentAction::QualityAssessment => "QUALITY_ASSESSMENT",
            AgentAction::Refinement => "REFINEMENT",
            AgentAction::SummaryRefinement => "SUMMARY_REFINEMENT",
            AgentAction::RefinementError => "REFINEMENT_ERROR",
            AgentAction::ExecutionComplete => "EXECUTION_COMPLETE",
        }
    }
}

impl fmt::Display for AgentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AgentAction,
    pub details: String,
    pub agent_id: String,
}
