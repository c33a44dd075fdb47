//! The ingestion seam between the HTTP layer and the external tools.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tempfile::TempDir;
use tracing::{info, warn};
use vsum_models::{extract_youtube_id, FrameSet, Transcript, VideoContext};

use crate::command::ProcessRunner;
use crate::config::IngestConfig;
use crate::download::{download_video, fetch_metadata};
use crate::error::{MediaError, MediaResult};
use crate::frames::extract_frames;
use crate::metrics;
use crate::transcript::fetch_transcript;

/// A fetched video and its scratch directory.
///
/// The scratch directory is removed when this value is dropped.
#[derive(Debug)]
pub struct IngestedVideo {
    pub context: VideoContext,
    pub url: String,
    pub video_path: Option<PathBuf>,
    workdir: Option<TempDir>,
}

impl IngestedVideo {
    pub fn new(context: VideoContext, url: impl Into<String>) -> Self {
        Self {
            context,
            url: url.into(),
            video_path: None,
            workdir: None,
        }
    }

    pub fn with_workdir(mut self, workdir: TempDir, video_path: Option<PathBuf>) -> Self {
        self.workdir = Some(workdir);
        self.video_path = video_path;
        self
    }

    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_ref().map(TempDir::path)
    }
}

/// Video acquisition, frame extraction and transcription.
#[async_trait]
pub trait IngestSource: Send + Sync {
    /// Validate `url`, read its metadata and make the media available locally.
    async fn fetch(&self, url: &str) -> MediaResult<IngestedVideo>;

    /// Up to `count` evenly spaced frames; empty on failure.
    async fn extract_frames(&self, video: &IngestedVideo, count: usize) -> FrameSet;

    /// Timestamped transcript, or `None` when absent or on failure.
    async fn extract_transcript(&self, video: &IngestedVideo) -> Option<Transcript>;
}

/// [`IngestSource`] backed by yt-dlp, ffprobe and ffmpeg.
#[derive(Debug, Clone, Default)]
pub struct YtDlpSource {
    config: IngestConfig,
}

impl YtDlpSource {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    fn scratch_dir(&self) -> MediaResult<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("vsum_");
        let dir = match &self.config.work_dir {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

#[async_trait]
impl IngestSource for YtDlpSource {
    async fn fetch(&self, url: &str) -> MediaResult<IngestedVideo> {
        let video_id = extract_youtube_id(url)?;
        info!(video_id = %video_id, "Ingesting video");

        let start = Instant::now();
        let runner = ProcessRunner::new().with_timeout(self.config.metadata_timeout_secs);
        let context = fetch_metadata(&runner, url).await;
        metrics::record_ingest("metadata", outcome(&context), start.elapsed().as_secs_f64());
        let context = context?;

        let workdir = self.scratch_dir()?;
        let start = Instant::now();
        let runner = ProcessRunner::new().with_timeout(self.config.download_timeout_secs);
        let video_path = download_video(&runner, url, workdir.path()).await;
        metrics::record_ingest("download", outcome(&video_path), start.elapsed().as_secs_f64());
        let video_path = video_path?;

        Ok(IngestedVideo::new(context, url).with_workdir(workdir, Some(video_path)))
    }

    async fn extract_frames(&self, video: &IngestedVideo, count: usize) -> FrameSet {
        let (Some(path), Some(dir)) = (video.video_path.as_deref(), video.workdir()) else {
            warn!("No local video file, skipping frame extraction");
            return FrameSet::empty();
        };

        let runner = ProcessRunner::new().with_timeout(self.config.ffmpeg_timeout_secs);
        let frames = extract_frames(&runner, path, dir, count).await;
        info!(frames = frames.len(), requested = count, "Frame extraction finished");
        metrics::record_frames_extracted(frames.len());
        frames
    }

    async fn extract_transcript(&self, video: &IngestedVideo) -> Option<Transcript> {
        let Some(dir) = video.workdir() else {
            warn!("No scratch directory, skipping transcript");
            return None;
        };

        let runner = ProcessRunner::new().with_timeout(self.config.metadata_timeout_secs);
        let transcript = match fetch_transcript(&runner, &video.url, dir, &self.config.sub_langs).await {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "Transcript unavailable");
                None
            }
        };
        metrics::record_transcript(transcript.is_some());
        transcript
    }
}

fn outcome<T>(result: &Result<T, MediaError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) if e.is_inaccessible() => "unavailable",
        Err(_) => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rejects_non_youtube_url() {
        let source = YtDlpSource::default();
        let err = source.fetch("https://vimeo.com/12345").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_without_local_media_degrades() {
        let source = YtDlpSource::default();
        let video = IngestedVideo::new(VideoContext::default(), "https://youtu.be/dQw4w9WgXcQ");
        assert!(source.extract_frames(&video, 8).await.is_empty());
        assert!(source.extract_transcript(&video).await.is_none());
    }

    #[test]
    fn test_workdir_removed_on_drop() {
        let dir = YtDlpSource::default().scratch_dir().unwrap();
        let path = dir.path().to_path_buf();
        let video = IngestedVideo::new(VideoContext::default(), "u").with_workdir(dir, None);
        assert!(path.exists());
        drop(video);
        assert!(!path.exists());
    }
}
