//! Video ingestion for the summary agent.
//!
//! This crate provides:
//! - YouTube metadata and download through yt-dlp
//! - Evenly spaced JPEG frames through ffprobe/ffmpeg
//! - Subtitle transcripts parsed from WebVTT
//! - Timeout and cancellation for every external process

pub mod command;
pub mod config;
pub mod download;
pub mod error;
pub mod frames;
pub mod metrics;
pub mod probe;
pub mod source;
pub mod transcript;

pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, ProcessRunner};
pub use config::IngestConfig;
pub use download::{download_video, fetch_metadata};
pub use error::{MediaError, MediaResult};
pub use frames::{extract_frames, frame_timestamps};
pub use probe::{probe_video, VideoInfo};
pub use source::{IngestSource, IngestedVideo, YtDlpSource};
pub use transcript::{fetch_transcript, parse_vtt};
