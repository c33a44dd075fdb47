//! Per-agent session state.
//!
//! Holds the append-only action log, the current plan and the last record
//! per modality. Owned by exactly one agent; never shared across requests.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use vsum_models::{
    ActionLogEntry, AgentAction, AgentStatus, AnalysisPlan, AnalysisRecord, AnalysisResults,
};

/// Build an agent id of the form `VideoAgent_{unix_secs}_{8 hex chars}`.
pub fn generate_agent_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("VideoAgent_{}_{}", Utc::now().timestamp(), &suffix[..8])
}

#[derive(Debug, Clone)]
pub struct SessionState {
    agent_id: String,
    log: Vec<ActionLogEntry>,
    plan: Option<AnalysisPlan>,
    cache: AnalysisResults,
}

impl SessionState {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            log: Vec::new(),
            plan: None,
            cache: AnalysisResults::new(),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Append an entry. Timestamps never go backwards, even if the wall clock does.
    pub fn log_action(&mut self, action: AgentAction, details: impl Into<String>) {
        let details = details.into();
        let mut timestamp = Utc::now();
        if let Some(last) = self.log.last() {
            if timestamp < last.timestamp {
                timestamp = last.timestamp;
            }
        }

        info!(agent_id = %self.agent_id, action = %action, "{}", details);

        self.log.push(ActionLogEntry {
            timestamp,
            action,
            details,
            agent_id: self.agent_id.clone(),
        });
    }

    pub fn log(&self) -> &[ActionLogEntry] {
        &self.log
    }

    pub fn last_action(&self) -> Option<AgentAction> {
        self.log.last().map(|e| e.action)
    }

    pub fn plan(&self) -> Option<&AnalysisPlan> {
        self.plan.as_ref()
    }

    pub fn set_plan(&mut self, plan: AnalysisPlan) {
        self.plan = Some(plan);
    }

    pub fn cached(&self) -> &AnalysisResults {
        &self.cache
    }

    /// Replace the cached record for the record's modality.
    pub fn cache_record(&mut self, record: AnalysisRecord) {
        self.cache.insert(record.modality(), record);
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            agent_id: self.agent_id.clone(),
            actions_taken: self.log.len(),
            cached_analyses: self.cache.keys().copied().collect(),
            has_plan: self.plan.is_some(),
            last_action: self.last_action(),
        }
    }

    /// `Agent completed analysis using steps: A → B → …` over the last `n` actions.
    pub fn reasoning_explanation(&self, n: usize) -> String {
        let start = self.log.len().saturating_sub(n);
        let actions: Vec<&str> = self.log[start..].iter().map(|e| e.action.as_str()).collect();
        format!("Agent completed analysis using steps: {}", actions.join(" → "))
    }
}
