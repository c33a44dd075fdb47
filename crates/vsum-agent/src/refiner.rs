//! Refinement stage.

use vsum_models::{AgentAction, AnalysisResults};

use crate::model::{BoundedModel, PromptPart};
use crate::prompts;
use crate::session::SessionState;

/// Outcome of a refinement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    pub text: String,
    pub succeeded: bool,
}

/// Ask the model to improve `draft`. On failure the draft is returned unchanged.
pub async fn refine(
    session: &mut SessionState,
    model: &BoundedModel,
    draft: &str,
    results: &AnalysisResults,
) -> Refinement {
    session.log_action(AgentAction::SummaryRefinement, "Improving summary quality");

    let prompt = prompts::refinement_prompt(draft, results);
    match model.call("refinement", &[PromptPart::Text(prompt)]).await {
        Ok(text) => Refinement {
            text,
            succeeded: true,
        },
        Err(e) => {
            session.log_action(
                AgentAction::RefinementError,
                format!("Summary refinement failed: {}", e),
            );
            Refinement {
                text: draft.to_string(),
                succeeded: false,
            }
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
    async fn test_refine_success() {
        let mut session = SessionState::new("agent");
        let out = refine(
            &mut session,
            &bounded(ScriptedModel::always("better")),
            "draft",
            &AnalysisResults::new(),
        )
        .await;
        assert_eq!(out.text, "better");
        assert!(out.succeeded);
    }

    #[tokio::test]
    async fn test_refine_failure_keeps_draft() {
        let mut session = SessionState::new("agent");
        let out = refine(
            &mut session,
            &bounded(ScriptedModel::failing()),
            "draft",
            &AnalysisResults::new(),
        )
        .await;
        assert_eq!(out.text, "draft");
        assert!(!out.succeeded);
        assert_eq!(session.last_action(), Some(AgentAction::RefinementError));
    }
}
