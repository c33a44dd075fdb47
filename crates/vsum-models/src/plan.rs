//! Analysis plans.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::Modality;

/// Rationale recorded on the fallback plan.
pub const FALLBACK_RATIONALE: &str = "Fallback analysis plan";

/// A single step an agent may plan.
///
/// Variant order is the canonical execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStep {
    VisualAnalysis,
    AudioAnalysis,
    MetadataAnalysis,
    ContentSynthesis,
}

impl AnalysisStep {
    /// Canonical full template.
    pub const CANONICAL: [AnalysisStep; 4] = [
        AnalysisStep::VisualAnalysis,
        AnalysisStep::AudioAnalysis,
        AnalysisStep::MetadataAnalysis,
        AnalysisStep::ContentSynthesis,
    ];

    /// Steps of the fallback plan.
    pub const FALLBACK: [AnalysisStep; 2] =
        [AnalysisStep::VisualAnalysis, AnalysisStep::ContentSynthesis];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStep::VisualAnalysis => "visual analysis",
            AnalysisStep::AudioAnalysis => "audio analysis",
            AnalysisStep::MetadataAnalysis => "metadata analysis",
            AnalysisStep::ContentSynthesis => "content synthesis",
        }
    }

    /// Modality analysed by this step; `None` for synthesis.
    pub fn modality(&self) -> Option<Modality> {
        match self {
            AnalysisStep::VisualAnalysis => Some(Modality::Visual),
            AnalysisStep::AudioAnalysis => Some(Modality::Audio),
            AnalysisStep::MetadataAnalysis => Some(Modality::Metadata),
            AnalysisStep::ContentSynthesis => None,
        }
    }
}

impl fmt::Display for AnalysisStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What inputs were available when the plan was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InputInventory {
    pub has_metadata: bool,
    pub frame_count: usize,
    pub has_audio: bool,
    pub duration_secs: u64,
}

/// Plan produced by the planner. Replaced only by re-planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisPlan {
    /// Model narrative, or the fallback rationale
    pub rationale: String,
    pub inventory: InputInventory,
    pub steps: Vec<AnalysisStep>,
    pub expected_insights: Vec<String>,
    /// Descriptive only; never evaluated
    pub quality_criteria: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_fallback: bool,
}

impl AnalysisPlan {
    /// Full canonical plan carrying the model's narrative.
    pub fn canonical(rationale: impl Into<String>, inventory: InputInventory) -> Self {
        Self {
            rationale: rationale.into(),
            inventory,
            steps: AnalysisStep::CANONICAL.to_vec(),
            expected_insights: vec![
                "Visual themes".to_string(),
                "Audio content".to_string(),
                "Metadata context".to_string(),
                "Comprehensive summary".to_string(),
            ],
            quality_criteria: vec![
                "Comprehensive coverage".to_string(),
                "Clear structure".to_string(),
                "Engaging content".to_string(),
                "Accurate analysis".to_string(),
            ],
            created_at: Utc::now(),
            is_fallback: false,
        }
    }

    /// Deterministic plan used when the model could not be reached.
    pub fn fallback(inventory: InputInventory) -> Self {
        Self {
            rationale: FALLBACK_RATIONALE.to_string(),
            inventory,
            steps: AnalysisStep::FALLBACK.to_vec(),
            expected_insights: vec!["Basic insights".to_string()],
            quality_criteria: vec!["Basic quality".to_string()],
            created_at: Utc::now(),
            is_fallback: true,
        }
    }

    /// Planned modality steps in canonical order, deduplicated.
    pub fn modality_steps(&self) -> Vec<AnalysisStep> {
        let mut steps: Vec<_> = self.steps.iter().copied().filter(|s| s.modality().is_some()).collect();
        steps.sort();
        steps.dedup();
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> InputInventory {
        InputInventory {
            has_metadata: true,
            frame_count: 8,
            has_audio: true,
            duration_secs: 120,
        }
    }

    #[test]
    fn test_fallback_plan_shape() {
        let plan = AnalysisPlan::fallback(inventory());
        assert_eq!(
            plan.steps,
            vec![AnalysisStep::VisualAnalysis, AnalysisStep::ContentSynthesis]
        );
        assert_eq!(plan.rationale, "Fallback analysis plan");
        assert_eq!(plan.expected_insights, vec!["Basic insights"]);
        assert_eq!(plan.quality_criteria, vec!["Basic quality"]);
        assert!(plan.is_fallback);
    }

    #[test]
    fn test_canonical_plan_ignores_rationale_for_steps() {
        let plan = AnalysisPlan::canonical("only do audio please", inventory());
        assert_eq!(plan.steps, AnalysisStep::CANONICAL.to_vec());
        assert_eq!(plan.rationale, "only do audio please");
    }

    #[test]
    fn test_modality_steps_are_sorted_and_unique() {
        let mut plan = AnalysisPlan::fallback(inventory());
        plan.steps = vec![
            AnalysisStep::ContentSynthesis,
            AnalysisStep::MetadataAnalysis,
            AnalysisStep::VisualAnalysis,
            AnalysisStep::MetadataAnalysis,
        ];
        assert_eq!(
            plan.modality_steps(),
            vec![AnalysisStep::VisualAnalysis, AnalysisStep::MetadataAnalysis]
        );
    }

    #[test]
    fn test_step_serializes_snake_case() {
        let json = serde_json::to_string(&AnalysisStep::ContentSynthesis).unwrap();
        assert_eq!(json, "\"content_synthesis\"");
    }
}
