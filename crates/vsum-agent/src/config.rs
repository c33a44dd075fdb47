//! Agent configuration.

use std::time::Duration;

use crate::error::{AgentError, AgentResult};

/// Score below which a draft is sent for refinement.
pub const QUALITY_THRESHOLD: f64 = 0.8;

/// Maximum frames attached to the visual prompt.
pub const MAX_VISUAL_FRAMES: usize = 6;

/// Maximum transcript characters embedded in the audio prompt.
pub const MAX_TRANSCRIPT_CHARS: usize = 2000;

/// Maximum description characters embedded in the planning prompt.
pub const MAX_PLAN_DESCRIPTION_CHARS: usize = 200;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_GEMINI_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-flash-lite"];

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Gemini API key (empty when unset)
    pub gemini_api_key: String,
    /// Models tried in order until one answers
    pub gemini_models: Vec<String>,
    /// Base URL of the Gemini REST API
    pub gemini_base_url: String,
    /// Upper bound on any single model call
    pub model_timeout: Duration,
    /// Number of trailing log actions in the reasoning trace
    pub trace_len: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_models: DEFAULT_GEMINI_MODELS.iter().map(|m| m.to_string()).collect(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model_timeout: Duration::from_secs(60),
            trace_len: 10,
        }
    }
}

impl AgentConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_models: std::env::var("GEMINI_MODELS")
                .ok()
                .map(|s| parse_model_list(&s))
                .filter(|models| !models.is_empty())
                .unwrap_or(defaults.gemini_models),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_base_url),
            model_timeout: Duration::from_secs(
                std::env::var("AGENT_MODEL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            trace_len: std::env::var("AGENT_TRACE_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Fail when the model cannot be reached with this config.
    pub fn validate(&self) -> AgentResult<()> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(AgentError::config_error("GEMINI_API_KEY not set"));
        }
        if self.gemini_models.is_empty() {
            return Err(AgentError::config_error("GEMINI_MODELS is empty"));
        }
        Ok(())
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.model_timeout, Duration::from_secs(60));
        assert_eq!(config.trace_len, 10);
        assert_eq!(config.gemini_models, vec!["gemini-2.5-flash", "gemini-2.5-flash-lite"]);
    }

    #[test]
    fn test_parse_model_list_skips_blanks() {
        assert_eq!(parse_model_list(" a , ,b,"), vec!["a", "b"]);
        assert!(parse_model_list(" , ").is_empty());
    }

    #[test]
    fn test_validate_requires_key() {
        let config = AgentConfig::default();
        assert!(matches!(config.validate(), Err(AgentError::Config(_))));

        let config = AgentConfig {
            gemini_api_key: "k".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
