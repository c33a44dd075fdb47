//! Smoke test and agent status handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vsum_agent::CAPABILITIES;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET /api/test
pub async fn test_api() -> Json<TestResponse> {
    Json(TestResponse {
        status: "API is working!".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentStatusResponse {
    pub capabilities: Vec<String>,
    pub model_name: String,
    pub models: Vec<String>,
    pub runs_served: u64,
    pub status: String,
}

/// GET /api/agent/status
///
/// Agents live for one request, so this reports the service rather than a
/// session.
pub async fn agent_status(State(state): State<AppState>) -> Json<AgentStatusResponse> {
    Json(AgentStatusResponse {
        capabilities: CAPABILITIES.iter().map(|c| c.to_string()).collect(),
        model_name: state.model.name().to_string(),
        models: state.agent_config.gemini_models.clone(),
        runs_served: state.runs_served(),
        status: "active".to_string(),
    })
}
