//! Execution stage: runs planned modality steps.
//!
//! Visual and audio calls fan out concurrently. Start and error entries are
//! logged in canonical step order regardless of completion order.

use futures::future::{join_all, BoxFuture, FutureExt};
use vsum_models::{
    AgentAction, AnalysisPlan, AnalysisRecord, AnalysisResults, AnalysisStep, FrameSet,
    Transcript, VideoContext,
};

use crate::runners::{analyze_metadata, StepRunners};
use crate::session::SessionState;

/// Planned steps whose input is present, in canonical order.
pub fn runnable_steps(
    plan: &AnalysisPlan,
    frames: &FrameSet,
    transcript: Option<&Transcript>,
) -> Vec<AnalysisStep> {
    plan.modality_steps()
        .into_iter()
        .filter(|step| match step {
            AnalysisStep::VisualAnalysis => !frames.is_empty(),
            AnalysisStep::AudioAnalysis => transcript.is_some_and(|t| !t.is_empty()),
            AnalysisStep::MetadataAnalysis => true,
            AnalysisStep::ContentSynthesis => false,
        })
        .collect()
}

/// Run every runnable step once and cache the records in the session.
pub async fn execute_steps(
    session: &mut SessionState,
    runners: &StepRunners,
    plan: &AnalysisPlan,
    video: &VideoContext,
    frames: &FrameSet,
    transcript: Option<&Transcript>,
) -> AnalysisResults {
    let steps = runnable_steps(plan, frames, transcript);

    for step in &steps {
        match step {
            AnalysisStep::VisualAnalysis => session.log_action(
                AgentAction::VisualAnalysis,
                format!("Analyzing {} visual frames", frames.len()),
            ),
            AnalysisStep::AudioAnalysis => {
                session.log_action(AgentAction::AudioAnalysis, "Processing audio content")
            }
            AnalysisStep::MetadataAnalysis => {
                session.log_action(AgentAction::MetadataAnalysis, "Processing video metadata")
            }
            AnalysisStep::ContentSynthesis => {}
        }
    }

    let tasks: Vec<BoxFuture<'_, Option<AnalysisRecord>>> = steps
        .iter()
        .map(|step| match step {
            AnalysisStep::VisualAnalysis => async move {
                Some(AnalysisRecord::from(runners.visual(video, frames).await))
            }
            .boxed(),
            AnalysisStep::AudioAnalysis => async move {
                match transcript {
                    Some(t) => Some(AnalysisRecord::from(runners.audio(video, t).await)),
                    None => None,
                }
            }
            .boxed(),
            AnalysisStep::MetadataAnalysis => {
                async move { Some(AnalysisRecord::from(analyze_metadata(video))) }.boxed()
            }
            AnalysisStep::ContentSynthesis => async { None }.boxed(),
        })
        .collect();

    let records = join_all(tasks).await;

    let mut results = AnalysisResults::new();
    for record in records.into_iter().flatten() {
        if let Some(error) = record.error() {
            match &record {
                AnalysisRecord::Visual(_) => session.log_action(
                    AgentAction::VisualError,
                    format!("Visual analysis failed: {}", error),
                ),
                AnalysisRecord::Audio(_) => session.log_action(
                    AgentAction::AudioError,
                    format!("Audio analysis failed: {}", error),
                ),
                AnalysisRecord::Metadata(_) => {}
            }
        }
        session.cache_record(record.clone());
        results.insert(record.modality(), record);
    }
    results
}
