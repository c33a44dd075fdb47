//! Scripted model used by unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AgentError, AgentResult};
use crate::model::{GenerativeModel, PromptPart};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
}

impl Reply {
    fn into_result(self) -> AgentResult<String> {
        match self {
            Reply::Text(t) => Ok(t),
            Reply::Fail => Err(AgentError::transport("scripted failure")),
        }
    }
}

/// Answers by rule (first prompt text contains a needle), then by default.
pub struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    default: Reply,
    delay: Option<Duration>,
    calls: Mutex<Vec<Vec<PromptPart>>>,
}

impl ScriptedModel {
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default: Reply::Text(text.into()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            default: Reply::Fail,
            ..Self::always("")
        }
    }

    /// Reply with `reply` when the first text part contains `needle`.
    pub fn on(mut self, needle: impl Into<String>, reply: Reply) -> Self {
        self.rules.push((needle.into(), reply));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Vec<PromptPart>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, parts: &[PromptPart]) -> AgentResult<String> {
        self.calls.lock().unwrap().push(parts.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let head = parts.iter().find_map(PromptPart::as_text).unwrap_or_default();
        if let Some((_, reply)) = self.rules.iter().find(|(needle, _)| head.contains(needle.as_str())) {
            return reply.clone().into_result();
        }
        self.default.clone().into_result()
    }
}
