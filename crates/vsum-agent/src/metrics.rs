//! Agent metrics.
//!
//! Recorded through the `metrics` facade; the binary decides whether a
//! recorder (Prometheus) is installed.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const MODEL_CALLS_TOTAL: &str = "vsum_model_calls_total";
    pub const MODEL_CALL_DURATION_SECONDS: &str = "vsum_model_call_duration_seconds";
    pub const STAGE_DURATION_SECONDS: &str = "vsum_stage_duration_seconds";
    pub const QUALITY_SCORE: &str = "vsum_quality_score";
    pub const REFINEMENTS_TOTAL: &str = "vsum_refinements_total";
    pub const FALLBACK_PLANS_TOTAL: &str = "vsum_fallback_plans_total";
    pub const RUNS_COMPLETED_TOTAL: &str = "vsum_runs_completed_total";
}

/// Record one model call and its outcome (`ok` or an error kind).
pub fn record_model_call(stage: &str, outcome: &str, duration_secs: f64) {
    let labels = [
        ("stage", stage.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::MODEL_CALLS_TOTAL, &labels).increment(1);
    histogram!(names::MODEL_CALL_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_stage_duration(stage: &str, duration_secs: f64) {
    let labels = [("stage", stage.to_string())];
    histogram!(names::STAGE_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_quality_score(score: f64) {
    histogram!(names::QUALITY_SCORE).record(score);
}

pub fn record_refinement(succeeded: bool) {
    let labels = [("succeeded", succeeded.to_string())];
    counter!(names::REFINEMENTS_TOTAL, &labels).increment(1);
}

pub fn record_fallback_plan() {
    counter!(names::FALLBACK_PLANS_TOTAL).increment(1);
}

pub fn record_run_completed(refined: bool) {
    let labels = [("refined", refined.to_string())];
    counter!(names::RUNS_COMPLETED_TOTAL, &labels).increment(1);
}
