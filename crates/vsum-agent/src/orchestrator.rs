//! The video summary agent.
//!
//! Drives one run through planning, execution, synthesis, scoring and
//! (when the score is low) refinement. One agent serves one request; its
//! session state is never shared.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, Instrument};
use vsum_models::{
    AgentAction, AgentStatus, AnalysisPlan, FrameSet, OrchestrationResult, RunId, Transcript,
    VideoContext,
};

use crate::config::AgentConfig;
use crate::executor;
use crate::extract::{InsightExtractor, PlaceholderExtractor};
use crate::logging::RunLogger;
use crate::metrics;
use crate::model::{BoundedModel, GenerativeModel};
use crate::planner;
use crate::quality;
use crate::refiner;
use crate::runners::StepRunners;
use crate::session::{generate_agent_id, SessionState};
use crate::synthesizer;

/// Tools the agent can apply, in the order they are offered.
pub const CAPABILITIES: [&str; 6] = [
    "visual_analysis",
    "audio_analysis",
    "metadata_analysis",
    "content_synthesis",
    "quality_check",
    "refinement",
];

/// Pipeline stage. Only `Scoring -> Refining` is conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Planning,
    Executing,
    Synthesizing,
    Scoring,
    Refining,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Planning => "planning",
            Stage::Executing => "executing",
            Stage::Synthesizing => "synthesizing",
            Stage::Scoring => "scoring",
            Stage::Refining => "refining",
            Stage::Done => "done",
        }
    }
}

pub struct VideoSummaryAgent {
    model: BoundedModel,
    runners: StepRunners,
    session: SessionState,
    logger: RunLogger,
    trace_len: usize,
    stage: Stage,
}

impl VideoSummaryAgent {
    /// Create an agent with the placeholder insight extractor.
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        config: &AgentConfig,
        cancel_rx: watch::Receiver<bool>,
    ) -> Self {
        let agent_id = generate_agent_id();
        let model = BoundedModel::new(model, config.model_timeout, cancel_rx);
        let runners = StepRunners::new(model.clone(), Arc::new(PlaceholderExtractor));

        debug!(agent_id = %agent_id, tools = ?CAPABILITIES, "Agent initialized");

        Self {
            logger: RunLogger::new(&RunId::new(), &agent_id),
            session: SessionState::new(agent_id),
            model,
            runners,
            trace_len: config.trace_len,
            stage: Stage::Idle,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn InsightExtractor>) -> Self {
        self.runners = StepRunners::new(self.model.clone(), extractor);
        self
    }

    /// Tag log output with an externally assigned run id.
    pub fn with_run_id(mut self, run_id: &RunId) -> Self {
        self.logger = RunLogger::new(run_id, self.session.agent_id());
        self
    }

    pub fn agent_id(&self) -> &str {
        self.session.agent_id()
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn status(&self) -> AgentStatus {
        self.session.status()
    }

    /// Plan the analysis and cache the plan. Never fails.
    pub async fn plan(
        &mut self,
        video: &VideoContext,
        frames: &FrameSet,
        transcript: Option<&Transcript>,
    ) -> AnalysisPlan {
        self.enter(Stage::Planning);
        let started = Instant::now();
        let plan =
            planner::create_plan(&mut self.session, &self.model, video, frames, transcript).await;
        metrics::record_stage_duration(Stage::Planning.as_str(), started.elapsed().as_secs_f64());
        plan
    }

    /// Run the full pipeline, planning first if no plan is cached. Never fails.
    pub async fn execute(
        &mut self,
        video: &VideoContext,
        frames: &FrameSet,
        transcript: Option<&Transcript>,
    ) -> OrchestrationResult {
        let span = self.logger.create_span();
        self.run(video, frames, transcript).instrument(span).await
    }

    async fn run(
        &mut self,
        video: &VideoContext,
        frames: &FrameSet,
        transcript: Option<&Transcript>,
    ) -> OrchestrationResult {
        self.logger.log_start(&video.title);
        self.session
            .log_action(AgentAction::ExecutionStart, "Beginning comprehensive video analysis");

        let cached = self.session.plan().cloned();
        let plan = match cached {
            Some(plan) => plan,
            None => self.plan(video, frames, transcript).await,
        };
        if plan.is_fallback {
            self.logger.log_warning("Using fallback plan");
        }

        self.enter(Stage::Executing);
        let started = Instant::now();
        let results = executor::execute_steps(
            &mut self.session,
            &self.runners,
            &plan,
            video,
            frames,
            transcript,
        )
        .await;
        metrics::record_stage_duration(Stage::Executing.as_str(), started.elapsed().as_secs_f64());

        self.session
            .log_action(AgentAction::Synthesis, "Combining all analysis results");
        self.enter(Stage::Synthesizing);
        let started = Instant::now();
        let draft = synthesizer::synthesize(&mut self.session, &self.model, video, &results).await;
        if draft == synthesizer::SYNTHESIS_FAILED {
            self.logger.log_error("Synthesis failed; returning fixed text");
        }
        metrics::record_stage_duration(
            Stage::Synthesizing.as_str(),
            started.elapsed().as_secs_f64(),
        );

        self.session
            .log_action(AgentAction::QualityCheck, "Evaluating summary quality");
        self.enter(Stage::Scoring);
        self.session
            .log_action(AgentAction::QualityAssessment, "Evaluating summary quality");
        let score = quality::score_summary(&draft);
        metrics::record_quality_score(score);

        let mut summary = draft;
        let mut refined = false;
        if quality::needs_refinement(score) {
            self.session.log_action(
                AgentAction::Refinement,
                format!("Quality score: {:.2}, refining summary", score),
            );
            self.enter(Stage::Refining);
            let started = Instant::now();
            let outcome = refiner::refine(&mut self.session, &self.model, &summary, &results).await;
            metrics::record_stage_duration(
                Stage::Refining.as_str(),
                started.elapsed().as_secs_f64(),
            );
            metrics::record_refinement(outcome.succeeded);
            if !outcome.succeeded {
                self.logger.log_warning("Refinement failed; keeping draft");
            }
            summary = outcome.text;
            refined = true;
        }

        let agent_reasoning = self.session.reasoning_explanation(self.trace_len);
        self.session.log_action(
            AgentAction::ExecutionComplete,
            format!("Analysis completed with quality score: {:.2}", score),
        );
        self.enter(Stage::Done);
        metrics::record_run_completed(refined);
        self.logger
            .log_completion(&format!("quality score {:.2}, refined: {}", score, refined));

        OrchestrationResult {
            summary,
            quality_score: score,
            analysis_steps_completed: results.keys().copied().collect(),
            agent_reasoning,
            execution_time: Utc::now(),
            refined,
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.logger.log_stage(self.stage.as_str(), stage.as_str());
        self.stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{
        AUDIO_HEADER, PLAN_HEADER, REFINEMENT_HEADER, SYNTHESIS_HEADER, VISUAL_HEADER,
    };
    use crate::synthesizer::SYNTHESIS_FAILED;
    use crate::testing::{Reply, ScriptedModel};
    use std::time::Duration;
    use vsum_models::{AnalysisStep, Frame, Modality};

    /// Long, structured draft that scores 1.0.
    fn strong_draft() -> String {
        let mut s = String::from("Executive summary\n\nVisual overview\n\nKey topics\n\nMain insights\n\n");
        while s.chars().count() < 800 {
            s.push_str("More detail. ");
        }
        s
    }

    fn agent(model: ScriptedModel) -> (VideoSummaryAgent, Arc<ScriptedModel>, watch::Sender<bool>) {
        let model = Arc::new(model);
        let (tx, rx) = watch::channel(false);
        let config = AgentConfig {
            model_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let agent = VideoSummaryAgent::new(model.clone(), &config, rx);
        (agent, model, tx)
    }

    fn video() -> VideoContext {
        VideoContext::new("Rust Ownership Explained", "Crab Channel", 240)
            .with_description("A walk through borrowing.")
    }

    fn frames(n: u8) -> FrameSet {
        (0..n).map(|i| Frame::jpeg(vec![i])).collect::<Vec<_>>().into()
    }

    fn actions(agent: &VideoSummaryAgent) -> Vec<AgentAction> {
        agent.session().log().iter().map(|e| e.action).collect()
    }

    #[test]
    fn test_agent_identity() {
        let (agent, _, _tx) = agent(ScriptedModel::always("x"));
        assert!(agent.agent_id().starts_with("VideoAgent_"));
        assert_eq!(agent.stage(), Stage::Idle);
        assert_eq!(agent.model_name(), "scripted");
        assert_eq!(CAPABILITIES.len(), 6);
    }

    #[tokio::test]
    async fn test_modalities_follow_input_availability() {
        let transcript = Transcript::new("spoken words");
        let cases: [(u8, Option<&Transcript>, Vec<Modality>); 4] = [
            (
                8,
                Some(&transcript),
                vec![Modality::Visual, Modality::Audio, Modality::Metadata],
            ),
            (8, None, vec![Modality::Visual, Modality::Metadata]),
            (0, Some(&transcript), vec![Modality::Audio, Modality::Metadata]),
            (0, None, vec![Modality::Metadata]),
        ];

        for (frame_count, transcript, expected) in cases {
            let (mut agent, _, _tx) = agent(ScriptedModel::always(strong_draft()));
            let result = agent.execute(&video(), &frames(frame_count), transcript).await;
            assert_eq!(result.analysis_steps_completed, expected);
        }
    }

    #[tokio::test]
    async fn test_high_score_skips_refinement() {
        let (mut agent, model, _tx) = agent(ScriptedModel::always(strong_draft()));
        let result = agent.execute(&video(), &frames(2), None).await;

        assert!((result.quality_score - 1.0).abs() < 1e-9);
        assert!(!result.refined);
        assert_eq!(result.summary, strong_draft());
        assert_eq!(agent.stage(), Stage::Done);
        // plan, visual, synthesis
        assert_eq!(model.call_count(), 3);
        assert!(!actions(&agent).contains(&AgentAction::Refinement));
    }

    #[tokio::test]
    async fn test_low_score_triggers_refinement() {
        let model = ScriptedModel::always("short")
            .on(REFINEMENT_HEADER, Reply::Text("refined text".into()));
        let (mut agent, _, _tx) = agent(model);
        let result = agent.execute(&video(), &FrameSet::empty(), None).await;

        assert!(result.refined);
        assert_eq!(result.summary, "refined text");
        // score reported is the draft's
        assert!((result.quality_score - 0.5).abs() < 1e-9);
        assert!(actions(&agent).contains(&AgentAction::SummaryRefinement));
    }

    #[tokio::test]
    async fn test_failed_refinement_keeps_draft() {
        let model = ScriptedModel::always("short draft").on(REFINEMENT_HEADER, Reply::Fail);
        let (mut agent, _, _tx) = agent(model);
        let result = agent.execute(&video(), &FrameSet::empty(), None).await;

        assert!(result.refined);
        assert_eq!(result.summary, "short draft");
        assert!(actions(&agent).contains(&AgentAction::RefinementError));
    }

    #[tokio::test]
    async fn test_always_failing_model() {
        let (mut agent, _, _tx) = agent(ScriptedModel::failing());

        let plan = agent.plan(&video(), &frames(4), None).await;
        assert_eq!(
            plan.steps,
            vec![AnalysisStep::VisualAnalysis, AnalysisStep::ContentSynthesis]
        );

        let result = agent
            .execute(&video(), &frames(4), Some(&Transcript::new("words")))
            .await;
        assert_eq!(result.summary, SYNTHESIS_FAILED);
        assert_eq!(result.analysis_steps_completed, vec![Modality::Visual]);

        let cached = agent.session().cached();
        assert_eq!(cached[&Modality::Visual].narrative(), "Visual analysis unavailable");
        assert!(actions(&agent).contains(&AgentAction::VisualError));
        assert!(actions(&agent).contains(&AgentAction::SynthesisError));
    }

    #[tokio::test]
    async fn test_execute_reuses_cached_plan() {
        let (mut agent, model, _tx) = agent(ScriptedModel::always(strong_draft()));
        agent.plan(&video(), &FrameSet::empty(), None).await;
        let planning_calls = model.call_count();

        agent.execute(&video(), &FrameSet::empty(), None).await;

        let plan_prompts = model
            .calls()
            .iter()
            .filter(|parts| parts[0].as_text().is_some_and(|t| t.starts_with(PLAN_HEADER)))
            .count();
        assert_eq!(planning_calls, 1);
        assert_eq!(plan_prompts, 1);
        assert_eq!(
            actions(&agent).iter().filter(|a| **a == AgentAction::Planning).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_action_log_sequence_and_order() {
        let model = ScriptedModel::always(strong_draft())
            .on(VISUAL_HEADER, Reply::Text("visual".into()))
            .on(AUDIO_HEADER, Reply::Text("audio".into()))
            .on(SYNTHESIS_HEADER, Reply::Text(strong_draft()));
        let (mut agent, _, _tx) = agent(model);
        let result = agent
            .execute(&video(), &frames(3), Some(&Transcript::new("words")))
            .await;

        assert_eq!(
            actions(&agent),
            vec![
                AgentAction::ExecutionStart,
                AgentAction::Planning,
                AgentAction::PlanCreated,
                AgentAction::VisualAnalysis,
                AgentAction::AudioAnalysis,
                AgentAction::MetadataAnalysis,
                AgentAction::Synthesis,
                AgentAction::ContentSynthesis,
                AgentAction::QualityCheck,
                AgentAction::QualityAssessment,
                AgentAction::ExecutionComplete,
            ]
        );

        let log = agent.session().log();
        assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        // Trace covers the last ten actions before completion
        assert_eq!(
            result.agent_reasoning,
            "Agent completed analysis using steps: EXECUTION_START → PLANNING → PLAN_CREATED → \
             VISUAL_ANALYSIS → AUDIO_ANALYSIS → METADATA_ANALYSIS → SYNTHESIS → \
             CONTENT_SYNTHESIS → QUALITY_CHECK → QUALITY_ASSESSMENT"
        );
    }

    #[tokio::test]
    async fn test_cancelled_run_still_returns_result() {
        let (mut agent, _, tx) = agent(ScriptedModel::always(strong_draft()));
        tx.send(true).unwrap();

        let result = agent.execute(&video(), &frames(2), None).await;
        assert_eq!(result.summary, SYNTHESIS_FAILED);
        assert_eq!(result.analysis_steps_completed, vec![Modality::Visual]);
    }

    #[tokio::test]
    async fn test_status_after_run() {
        let (mut agent, _, _tx) = agent(ScriptedModel::always(strong_draft()));
        agent.execute(&video(), &FrameSet::empty(), None).await;

        let status = agent.status();
        assert!(status.has_plan);
        assert_eq!(status.cached_analyses, vec![Modality::Metadata]);
        assert_eq!(status.last_action, Some(AgentAction::ExecutionComplete));
        assert_eq!(status.actions_taken, agent.session().log().len());
    }
}
