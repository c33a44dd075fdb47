//! Ingestion metrics.

use metrics::{counter, histogram};

pub mod names {
    pub const INGEST_TOTAL: &str = "vsum_ingest_total";
    pub const INGEST_DURATION_SECONDS: &str = "vsum_ingest_duration_seconds";
    pub const FRAMES_EXTRACTED: &str = "vsum_frames_extracted";
    pub const TRANSCRIPTS_TOTAL: &str = "vsum_transcripts_total";
}

/// Record one ingestion phase (`metadata`, `download`) and its outcome.
pub fn record_ingest(phase: &str, outcome: &str, duration_secs: f64) {
    let labels = [
        ("phase", phase.to_string()),
        ("outcome", outcome.to_string()),
    ];
    counter!(names::INGEST_TOTAL, &labels).increment(1);
    histogram!(names::INGEST_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_frames_extracted(count: usize) {
    histogram!(names::FRAMES_EXTRACTED).record(count as f64);
}

pub fn record_transcript(found: bool) {
    let labels = [("found", found.to_string())];
    counter!(names::TRANSCRIPTS_TOTAL, &labels).increment(1);
}
