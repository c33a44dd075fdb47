//! Video context models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Placeholder used for any engagement figure the source did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Unique identifier for one summarization run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Metadata describing the video being summarized.
///
/// Produced once per request by ingestion and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoContext {
    /// Video title
    pub title: String,

    /// Channel / uploader name
    pub channel: String,

    /// Duration in whole seconds
    #[serde(default)]
    pub duration_secs: u64,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// View count, if the source reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,

    /// Upload date as reported by the source (e.g. `20240131`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
}

impl Default for VideoContext {
    fn default() -> Self {
        Self {
            title: "Unknown Title".to_string(),
            channel: "Unknown Channel".to_string(),
            duration_secs: 0,
            description: String::new(),
            view_count: None,
            upload_date: None,
        }
    }
}

impl VideoContext {
    /// Create a new video context.
    pub fn new(title: impl Into<String>, channel: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            title: title.into(),
            channel: channel.into(),
            duration_secs,
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the view count.
    pub fn with_view_count(mut self, view_count: u64) -> Self {
        self.view_count = Some(view_count);
        self
    }

    /// Set the upload date.
    pub fn with_upload_date(mut self, upload_date: impl Into<String>) -> Self {
        self.upload_date = Some(upload_date.into());
        self
    }

    /// Human-readable duration, `"N/A"` when the source reported none.
    pub fn duration_label(&self) -> String {
        if self.duration_secs == 0 {
            NOT_AVAILABLE.to_string()
        } else {
            format!("{} seconds", self.duration_secs)
        }
    }

    /// View count label for display and prompts.
    pub fn view_count_label(&self) -> String {
        self.view_count
            .map(|v| v.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Upload date label for display and prompts.
    pub fn upload_date_label(&self) -> String {
        match self.upload_date.as_deref() {
            Some(d) if !d.trim().is_empty() => d.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// First `max_chars` characters of the description.
    pub fn description_excerpt(&self, max_chars: usize) -> String {
        self.description.chars().take(max_chars).collect()
    }
}
