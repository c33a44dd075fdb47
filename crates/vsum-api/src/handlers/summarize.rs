//! Video summary handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use vsum_agent::VideoSummaryAgent;
use vsum_models::{extract_youtube_id, AgentStatus, Modality, OrchestrationResult, RunId, VideoContext};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Value of `analysis_details.analysis_type`.
pub const ANALYSIS_TYPE: &str = "ai_agent_comprehensive_analysis";

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoInfoResponse {
    pub title: String,
    /// `"N seconds"` or `"N/A"`
    pub duration: String,
    pub channel: String,
    pub view_count: String,
    pub upload_date: String,
}

impl From<&VideoContext> for VideoInfoResponse {
    fn from(video: &VideoContext) -> Self {
        Self {
            title: video.title.clone(),
            duration: video.duration_label(),
            channel: video.channel.clone(),
            view_count: video.view_count_label(),
            upload_date: video.upload_date_label(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub frames_analyzed: usize,
    pub audio_processed: bool,
    pub analysis_type: String,
    pub quality_score: f64,
    pub analysis_steps_completed: Vec<Modality>,
    pub agent_reasoning: String,
    pub agent_id: String,
    pub agent_actions_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub video_info: VideoInfoResponse,
    pub analysis_details: AnalysisDetails,
}

impl SummarizeResponse {
    fn new(
        video: &VideoContext,
        frames_analyzed: usize,
        audio_processed: bool,
        result: OrchestrationResult,
        status: AgentStatus,
    ) -> Self {
        Self {
            summary: result.summary,
            video_info: video.into(),
            analysis_details: AnalysisDetails {
                frames_analyzed,
                audio_processed,
                analysis_type: ANALYSIS_TYPE.to_string(),
                quality_score: result.quality_score,
                analysis_steps_completed: result.analysis_steps_completed,
                agent_reasoning: result.agent_reasoning,
                agent_id: status.agent_id,
                agent_actions_count: status.actions_taken,
            },
        }
    }
}

/// POST /api/summarize
///
/// Fetches the video, extracts frames and a transcript, and runs a fresh
/// agent over them. The scratch directory is dropped before returning.
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> ApiResult<Json<SummarizeResponse>> {
    let url = payload
        .ok()
        .and_then(|Json(req)| req.url)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("YouTube URL is required"))?;

    let video_id = extract_youtube_id(&url)
        .map_err(|e| ApiError::bad_request(format!("Invalid YouTube URL: {}", e)))?;

    let run_id = RunId::new();
    info!(run_id = %run_id, video_id = %video_id, "Summary requested");

    let video = state.ingest.fetch(&url).await?;

    let (frames, transcript) = tokio::join!(
        state.ingest.extract_frames(&video, state.frame_count),
        state.ingest.extract_transcript(&video),
    );

    let mut agent =
        VideoSummaryAgent::new(state.model.clone(), &state.agent_config, state.cancel_signal())
            .with_run_id(&run_id);
    let result = agent
        .execute(&video.context, &frames, transcript.as_ref())
        .await;

    let served = state.record_run();
    info!(
        run_id = %run_id,
        agent_id = %agent.agent_id(),
        quality_score = result.quality_score,
        runs_served = served,
        "Summary completed"
    );

    Ok(Json(SummarizeResponse::new(
        &video.context,
        frames.len(),
        transcript.is_some(),
        result,
        agent.status(),
    )))
}
