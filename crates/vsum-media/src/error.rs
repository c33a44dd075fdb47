//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;
use vsum_models::YoutubeIdError;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during ingestion.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("Invalid video URL: {0}")]
    InvalidUrl(#[from] YoutubeIdError),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Metadata extraction failed: {message}")]
    MetadataFailed { message: String },

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),
}

impl MediaError {
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    pub fn metadata_failed(message: impl Into<String>) -> Self {
        Self::MetadataFailed {
            message: message.into(),
        }
    }

    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    pub fn video_unavailable(message: impl Into<String>) -> Self {
        Self::VideoUnavailable(message.into())
    }

    /// True when the caller sent something we refuse to fetch.
    pub fn is_validation(&self) -> bool {
        matches!(self, MediaError::InvalidUrl(_))
    }

    /// True when the video itself could not be reached (private, removed,
    /// blocked, or yt-dlp refused it).
    pub fn is_inaccessible(&self) -> bool {
        matches!(
            self,
            MediaError::VideoUnavailable(_)
                | MediaError::DownloadFailed { .. }
                | MediaError::MetadataFailed { .. }
        )
    }
}

/// Turn yt-dlp stderr into an error, separating permanently unavailable
/// videos from other failures.
pub(crate) fn classify_ytdlp_failure(stderr: &str, fallback: fn(String) -> MediaError) -> MediaError {
    let last_error = stderr
        .lines()
        .rev()
        .find(|l| l.contains("ERROR"))
        .or_else(|| stderr.lines().last())
        .unwrap_or("Unknown error")
        .trim()
        .to_string();

    let lower = stderr.to_lowercase();
    let unavailable = lower.contains("private video")
        || lower.contains("video unavailable")
        || lower.contains("video is unavailable")
        || lower.contains("has been removed")
        || (lower.contains("age") && lower.contains("restrict"))
        || lower.contains("not available in your country")
        || (lower.contains("copyright") && lower.contains("block"));

    if unavailable {
        MediaError::video_unavailable(last_error)
    } else {
        fallback(last_error)
    }
}
