//! Planning stage.

use vsum_models::{
    AgentAction, AnalysisPlan, FrameSet, InputInventory, Transcript, VideoContext,
};

use crate::metrics;
use crate::model::{BoundedModel, PromptPart};
use crate::prompts;
use crate::session::SessionState;

/// Inventory of the inputs available for this run.
pub fn inventory(
    video: &VideoContext,
    frames: &FrameSet,
    transcript: Option<&Transcript>,
) -> InputInventory {
    InputInventory {
        has_metadata: true,
        frame_count: frames.len(),
        has_audio: transcript.is_some_and(|t| !t.is_empty()),
        duration_secs: video.duration_secs,
    }
}

/// Ask the model for a plan and store it in the session.
///
/// The model's narrative becomes the rationale; step selection is always the
/// canonical template. Any model failure yields the fallback plan.
pub async fn create_plan(
    session: &mut SessionState,
    model: &BoundedModel,
    video: &VideoContext,
    frames: &FrameSet,
    transcript: Option<&Transcript>,
) -> AnalysisPlan {
    session.log_action(
        AgentAction::Planning,
        "Analyzing available data and creating execution plan",
    );

    let inventory = inventory(video, frames, transcript);
    let prompt = prompts::planning_prompt(&inventory, video);

    let plan = match model.call("planning", &[PromptPart::Text(prompt)]).await {
        Ok(text) => {
            let plan = AnalysisPlan::canonical(text, inventory);
            session.log_action(
                AgentAction::PlanCreated,
                format!("Created {} step plan", plan.steps.len()),
            );
            plan
        }
        Err(e) => {
            session.log_action(AgentAction::PlanError, format!("Planning failed: {}", e));
            metrics::record_fallback_plan();
            AnalysisPlan::fallback(inventory)
        }
    };

    session.set_plan(plan.clone());
    plan
}
