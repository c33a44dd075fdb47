//! Generative model abstraction and the bounded call boundary.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};
use vsum_models::Frame;

use crate::error::{AgentError, AgentResult};
use crate::metrics;

/// One element of a multimodal prompt.
#[derive(Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    Image(Frame),
}

impl PromptPart {
    pub fn text(s: impl Into<String>) -> Self {
        PromptPart::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PromptPart::Text(t) => Some(t),
            PromptPart::Image(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, PromptPart::Image(_))
    }
}

impl fmt::Debug for PromptPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptPart::Text(t) => f.debug_tuple("Text").field(&t.len()).finish(),
            PromptPart::Image(frame) => f.debug_tuple("Image").field(frame).finish(),
        }
    }
}

/// A text/vision model: prompt parts in, text out.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Name used in logs and status output.
    fn name(&self) -> &str;

    async fn generate(&self, parts: &[PromptPart]) -> AgentResult<String>;
}

/// Wraps a model so every call is bounded by a timeout and a cancel signal.
///
/// Timeouts, cancellation and blank responses all surface as `AgentError`.
#[derive(Clone)]
pub struct BoundedModel {
    model: Arc<dyn GenerativeModel>,
    timeout: Duration,
    cancel_rx: watch::Receiver<bool>,
}

impl BoundedModel {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        timeout: Duration,
        cancel_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            model,
            timeout,
            cancel_rx,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Call the model for `stage`.
    pub async fn call(&self, stage: &str, parts: &[PromptPart]) -> AgentResult<String> {
        let started = Instant::now();

        let result = if *self.cancel_rx.borrow() {
            Err(AgentError::Cancelled)
        } else {
            let mut cancel_rx = self.cancel_rx.clone();
            tokio::select! {
                res = tokio::time::timeout(self.timeout, self.model.generate(parts)) => {
                    match res {
                        Ok(inner) => inner,
                        Err(_) => Err(AgentError::Timeout(self.timeout.as_secs())),
                    }
                }
                _ = wait_for_cancel(&mut cancel_rx) => Err(AgentError::Cancelled),
            }
        };

        let result = result.and_then(|text| {
            if text.trim().is_empty() {
                Err(AgentError::EmptyResponse)
            } else {
                Ok(text)
            }
        });

        let elapsed = started.elapsed().as_secs_f64();
        match &result {
            Ok(text) => {
                debug!(stage, model = self.model.name(), chars = text.len(), "Model call succeeded");
                metrics::record_model_call(stage, "ok", elapsed);
            }
            Err(e) => {
                warn!(stage, model = self.model.name(), error = %e, "Model call failed");
                metrics::record_model_call(stage, e.kind(), elapsed);
            }
        }
        result
    }
}

/// Resolves once the signal flips to `true`; never resolves if the sender is gone.
async fn wait_for_cancel(cancel_rx: &mut watch::Receiver<bool>) {
    if cancel_rx.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedModel;

    fn bounded(model: ScriptedModel, timeout: Duration) -> (BoundedModel, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (BoundedModel::new(Arc::new(model), timeout, rx), tx)
    }

    #[tokio::test]
    async fn test_passes_through_text() {
        let (model, _tx) = bounded(ScriptedModel::always("hello"), Duration::from_secs(5));
        let text = model.call("test", &[PromptPart::text("hi")]).await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let (model, _tx) = bounded(ScriptedModel::always("   \n"), Duration::from_secs(5));
        let err = model.call("test", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_timeout_becomes_error() {
        let slow = ScriptedModel::always("late").with_delay(Duration::from_millis(500));
        let (model, _tx) = bounded(slow, Duration::from_millis(20));
        let err = model.call("test", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_cancel_before_call() {
        let (model, tx) = bounded(ScriptedModel::always("x"), Duration::from_secs(5));
        tx.send(true).unwrap();
        let err = model.call("test", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_during_call() {
        let slow = ScriptedModel::always("late").with_delay(Duration::from_secs(5));
        let (model, tx) = bounded(slow, Duration::from_secs(10));

        let handle = tokio::spawn(async move { model.call("test", &[]).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(true).unwrap();

        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, AgentError::Cancelled));
    }

    #[tokio::test]
    async fn test_dropped_sender_does_not_cancel() {
        let (model, tx) = bounded(ScriptedModel::always("ok"), Duration::from_secs(5));
        drop(tx);
        assert_eq!(model.call("test", &[]).await.unwrap(), "ok");
    }
}
