//! Per-modality analysis records.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Narrative used when the visual model call failed.
pub const VISUAL_UNAVAILABLE: &str = "Visual analysis unavailable";

/// Narrative used when the audio model call failed.
pub const AUDIO_UNAVAILABLE: &str = "Audio analysis unavailable";

/// Input modality of an analysis step.
///
/// Variant order is the canonical execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Visual,
    Audio,
    Metadata,
}

impl Modality {
    /// All modalities in canonical order.
    pub const ALL: [Modality; 3] = [Modality::Visual, Modality::Audio, Modality::Metadata];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Visual => "visual",
            Modality::Audio => "audio",
            Modality::Metadata => "metadata",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the visual runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VisualAnalysis {
    pub analysis: String,
    pub frames_processed: usize,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub visual_themes: Vec<String>,
    /// Captured model error when the record is degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VisualAnalysis {
    /// Degraded record carrying the captured error text.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            analysis: VISUAL_UNAVAILABLE.to_string(),
            frames_processed: 0,
            key_insights: Vec::new(),
            visual_themes: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Result of the audio runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AudioAnalysis {
    pub analysis: String,
    pub transcript_length: usize,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub tone_analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AudioAnalysis {
    /// Degraded record carrying the captured error text.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            analysis: AUDIO_UNAVAILABLE.to_string(),
            transcript_length: 0,
            key_topics: Vec::new(),
            tone_analysis: String::new(),
            error: Some(error.into()),
        }
    }
}

/// View count and upload date as display strings (`"N/A"` when unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EngagementMetrics {
    pub view_count: String,
    pub upload_date: String,
}

/// Result of the rule-based metadata runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataAnalysis {
    pub title_analysis: String,
    pub channel_context: String,
    pub duration_analysis: String,
    pub description_insights: String,
    pub engagement_metrics: EngagementMetrics,
}

/// Analysis output for one modality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "modality", rename_all = "snake_case")]
pub enum AnalysisRecord {
    Visual(VisualAnalysis),
    Audio(AudioAnalysis),
    Metadata(MetadataAnalysis),
}

impl AnalysisRecord {
    pub fn modality(&self) -> Modality {
        match self {
            AnalysisRecord::Visual(_) => Modality::Visual,
            AnalysisRecord::Audio(_) => Modality::Audio,
            AnalysisRecord::Metadata(_) => Modality::Metadata,
        }
    }

    /// Main narrative text of the record.
    pub fn narrative(&self) -> &str {
        match self {
            AnalysisRecord::Visual(v) => &v.analysis,
            AnalysisRecord::Audio(a) => &a.analysis,
            AnalysisRecord::Metadata(m) => &m.duration_analysis,
        }
    }

    /// True when the runner fell back after a model failure.
    pub fn is_degraded(&self) -> bool {
        match self {
            AnalysisRecord::Visual(v) => v.error.is_some(),
            AnalysisRecord::Audio(a) => a.error.is_some(),
            AnalysisRecord::Metadata(_) => false,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisRecord::Visual(v) => v.error.as_deref(),
            AnalysisRecord::Audio(a) => a.error.as_deref(),
            AnalysisRecord::Metadata(_) => None,
        }
    }
}

impl From<VisualAnalysis> for AnalysisRecord {
    fn from(v: VisualAnalysis) -> Self {
        AnalysisRecord::Visual(v)
    }
}

impl From<AudioAnalysis> for AnalysisRecord {
    fn from(a: AudioAnalysis) -> Self {
        AnalysisRecord::Audio(a)
    }
}

impl From<MetadataAnalysis> for AnalysisRecord {
    fn from(m: MetadataAnalysis) -> Self {
        AnalysisRecord::Metadata(m)
    }
}

/// Modality to record, iterated in canonical order.
pub type AnalysisResults = BTreeMap<Modality, AnalysisRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_order_is_canonical() {
        let mut v = vec![Modality::Metadata, Modality::Visual, Modality::Audio];
        v.sort();
        assert_eq!(v, Modality::ALL.to_vec());
    }

    #[test]
    fn test_results_map_iterates_canonically() {
        let mut results = AnalysisResults::new();
        results.insert(
            Modality::Metadata,
            MetadataAnalysis {
                title_analysis: "t".into(),
                channel_context: "c".into(),
                duration_analysis: "Short-form content".into(),
                description_insights: "d".into(),
                engagement_metrics: EngagementMetrics {
                    view_count: "N/A".into(),
                    upload_date: "N/A".into(),
                },
            }
            .into(),
        );
        results.insert(Modality::Visual, VisualAnalysis::unavailable("boom").into());

        let keys: Vec<_> = results.keys().copied().collect();
        assert_eq!(keys, vec![Modality::Visual, Modality::Metadata]);
    }

    #[test]
    fn test_unavailable_records_are_degraded() {
        let visual: AnalysisRecord = VisualAnalysis::unavailable("quota").into();
        assert!(visual.is_degraded());
        assert_eq!(visual.narrative(), VISUAL_UNAVAILABLE);
        assert_eq!(visual.error(), Some("quota"));

        let audio: AnalysisRecord = AudioAnalysis::unavailable("timeout").into();
        assert_eq!(audio.narrative(), AUDIO_UNAVAILABLE);
        assert_eq!(audio.modality(), Modality::Audio);
    }

    #[test]
    fn test_record_serializes_with_modality_tag() {
        let record: AnalysisRecord = VisualAnalysis::unavailable("x").into();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["modality"], "visual");
        assert_eq!(json["analysis"], VISUAL_UNAVAILABLE);
    }
}
