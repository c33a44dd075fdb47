//! Shared data models for the video summary agent.
//!
//! This crate provides Serde-serializable types for:
//! - Video context, frames and transcripts
//! - Per-modality analysis records
//! - Analysis plans and the session action log
//! - Orchestration results

pub mod action;
pub mod analysis;
pub mod frame;
pub mod plan;
pub mod result;
pub mod utils;
pub mod video;

// Re-export common types
pub use action::{ActionLogEntry, AgentAction};
pub use analysis::{
    AnalysisRecord, AnalysisResults, AudioAnalysis, EngagementMetrics, MetadataAnalysis, Modality,
    VisualAnalysis, AUDIO_UNAVAILABLE, VISUAL_UNAVAILABLE,
};
pub use frame::{Frame, FrameSet, Transcript};
pub use plan::{AnalysisPlan, AnalysisStep, InputInventory, FALLBACK_RATIONALE};
pub use result::{AgentStatus, OrchestrationResult};
pub use utils::{extract_youtube_id, is_youtube_url, YoutubeIdError, YoutubeIdResult};
pub use video::{RunId, VideoContext, NOT_AVAILABLE};
