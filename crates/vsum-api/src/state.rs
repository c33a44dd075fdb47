//! Application state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use vsum_agent::{AgentConfig, GeminiClient, GenerativeModel};
use vsum_media::{IngestConfig, IngestSource, YtDlpSource};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Holds no agent: each summary request builds its own orchestrator so
/// sessions never leak between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub agent_config: AgentConfig,
    pub model: Arc<dyn GenerativeModel>,
    pub ingest: Arc<dyn IngestSource>,
    /// Frames requested from the ingest source per video
    pub frame_count: usize,
    runs_served: Arc<AtomicU64>,
    shutdown_rx: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        agent_config: AgentConfig,
        model: Arc<dyn GenerativeModel>,
        ingest: Arc<dyn IngestSource>,
        frame_count: usize,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            agent_config,
            model,
            ingest,
            frame_count,
            runs_served: Arc::new(AtomicU64::new(0)),
            shutdown_rx,
        }
    }

    /// Build state backed by Gemini and yt-dlp from environment config.
    pub fn from_env(config: ApiConfig, shutdown_rx: watch::Receiver<bool>) -> anyhow::Result<Self> {
        let agent_config = AgentConfig::from_env();
        let ingest_config = IngestConfig::from_env();

        let model = GeminiClient::new(&agent_config)?;
        let frame_count = ingest_config.frame_count;

        Ok(Self::new(
            config,
            agent_config,
            Arc::new(model),
            Arc::new(YtDlpSource::new(ingest_config)),
            frame_count,
            shutdown_rx,
        ))
    }

    /// Cancel signal handed to each agent; flips on server shutdown.
    pub fn cancel_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn record_run(&self) -> u64 {
        self.runs_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn runs_served(&self) -> u64 {
        self.runs_served.load(Ordering::Relaxed)
    }
}
