//! Synthesis stage.

use vsum_models::{AgentAction, AnalysisResults, VideoContext};

use crate::model::{BoundedModel, PromptPart};
use crate::prompts;
use crate::session::SessionState;

/// Returned in place of a draft when the synthesis call fails.
pub const SYNTHESIS_FAILED: &str = "Summary generation failed. Please try again.";

/// Merge every record into one draft narrative. Never fails.
pub async fn synthesize(
    session: &mut SessionState,
    model: &BoundedModel,
    video: &VideoContext,
    results: &AnalysisResults,
) -> String {
    session.log_action(AgentAction::ContentSynthesis, "Creating comprehensive summary");

    let prompt = prompts::synthesis_prompt(video, results);
    match model.call("synthesis", &[PromptPart::Text(prompt)]).await {
        Ok(text) => text,
        Err(e) => {
            session.log_action(
                AgentAction::SynthesisError,
                format!("Content synthesis failed: {}", e),
            );
            SYNTHESIS_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedModel;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;

    fn bounded(model: ScriptedModel) -> BoundedModel {
        let (_tx, rx) = watch::channel(false);
        BoundedModel::new(Arc::new(model), Duration::from_secs(5), rx)
    }

    #[tokio::test]
    async fn test_synthesis_returns_model_text() {
        let mut session = SessionState::new("agent");
        let text = synthesize(
            &mut session,
            &bounded(ScriptedModel::always("draft")),
            &VideoContext::default(),
            &AnalysisResults::new(),
        )
        .await;
        assert_eq!(text, "draft");
        assert_eq!(session.last_action(), Some(AgentAction::ContentSynthesis));
    }

    #[tokio::test]
    async fn test_synthesis_failure_returns_fixed_text() {
        let mut session = SessionState::new("agent");
        let text = synthesize(
            &mut session,
            &bounded(ScriptedModel::failing()),
            &VideoContext::default(),
            &AnalysisResults::new(),
        )
        .await;
        assert_eq!(text, SYNTHESIS_FAILED);
        assert_eq!(session.last_action(), Some(AgentAction::SynthesisError));
    }
}
