//! Ingestion configuration.

use std::path::PathBuf;

/// Ingestion configuration.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Parent directory for per-request scratch dirs (system temp when unset)
    pub work_dir: Option<PathBuf>,
    /// Frames extracted per video
    pub frame_count: usize,
    /// Timeout for `yt-dlp --dump-json`
    pub metadata_timeout_secs: u64,
    /// Timeout for the video download
    pub download_timeout_secs: u64,
    /// Timeout for each ffmpeg/ffprobe invocation
    pub ffmpeg_timeout_secs: u64,
    /// Subtitle languages passed to `--sub-lang`
    pub sub_langs: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            frame_count: 8,
            metadata_timeout_secs: 60,
            download_timeout_secs: 600,
            ffmpeg_timeout_secs: 60,
            sub_langs: "en,en-US,en-GB".to_string(),
        }
    }
}

impl IngestConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("INGEST_WORK_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            frame_count: std::env::var("INGEST_FRAME_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.frame_count),
            metadata_timeout_secs: std::env::var("INGEST_METADATA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.metadata_timeout_secs),
            download_timeout_secs: std::env::var("INGEST_DOWNLOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.download_timeout_secs),
            ffmpeg_timeout_secs: std::env::var("INGEST_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ffmpeg_timeout_secs),
            sub_langs: std::env::var("INGEST_SUB_LANGS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.sub_langs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.frame_count, 8);
        assert_eq!(config.sub_langs, "en,en-US,en-GB");
        assert!(config.work_dir.is_none());
    }
}
