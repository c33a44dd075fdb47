//! Video summary agent.
//!
//! Plans an analysis, runs the visual/audio/metadata steps, synthesizes a
//! draft, scores it and refines it when the score is low. Every model call
//! is bounded by a timeout and a cancel signal; model failures degrade the
//! output instead of failing the run.

pub mod config;
pub mod error;
pub mod executor;
pub mod extract;
pub mod gemini;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub mod planner;
pub mod prompts;
pub mod quality;
pub mod refiner;
pub mod runners;
pub mod session;
pub mod synthesizer;

#[cfg(test)]
mod testing;

pub use config::{AgentConfig, MAX_VISUAL_FRAMES, QUALITY_THRESHOLD};
pub use error::{AgentError, AgentResult};
pub use extract::{InsightExtractor, PlaceholderExtractor};
pub use gemini::GeminiClient;
pub use logging::RunLogger;
pub use model::{BoundedModel, GenerativeModel, PromptPart};
pub use orchestrator::{Stage, VideoSummaryAgent, CAPABILITIES};
pub use quality::score_summary;
pub use session::SessionState;
pub use synthesizer::SYNTHESIS_FAILED;
