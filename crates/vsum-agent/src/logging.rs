//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for agent runs with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};
use vsum_models::RunId;

/// Run logger for structured logging with consistent formatting.
///
/// Carries the run ID and agent ID so every event of one summarization
/// can be correlated.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    agent_id: String,
}

impl RunLogger {
    pub fn new(run_id: &RunId, agent_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            agent_id: agent_id.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            agent_id = %self.agent_id,
            "Run started: {}", message
        );
    }

    /// Log a stage transition.
    pub fn log_stage(&self, from: &str, to: &str) {
        info!(
            run_id = %self.run_id,
            agent_id = %self.agent_id,
            from,
            to,
            "Run stage: {}", to
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            agent_id = %self.agent_id,
            "Run warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            agent_id = %self.agent_id,
            "Run error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            agent_id = %self.agent_id,
            "Run completed: {}", message
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "agent_run",
            run_id = %self.run_id,
            agent_id = %self.agent_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_creation() {
        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id, "VideoAgent_1_abcd");

        assert_eq!(logger.run_id(), run_id.to_string());
        assert_eq!(logger.agent_id(), "VideoAgent_1_abcd");
    }
}
