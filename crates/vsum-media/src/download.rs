//! Video metadata and download via yt-dlp.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;
use vsum_models::VideoContext;

use crate::command::{check_ytdlp, ProcessRunner};
use crate::error::{classify_ytdlp_failure, MediaError, MediaResult};

/// File stem used for the downloaded video inside the work dir.
const VIDEO_STEM: &str = "video";

/// Subset of `yt-dlp --dump-json` output.
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    title: Option<String>,
    uploader: Option<String>,
    channel: Option<String>,
    duration: Option<f64>,
    description: Option<String>,
    view_count: Option<u64>,
    upload_date: Option<String>,
}

impl From<YtDlpInfo> for VideoContext {
    fn from(info: YtDlpInfo) -> Self {
        let defaults = VideoContext::default();
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        VideoContext {
            title: non_empty(info.title).unwrap_or(defaults.title),
            channel: non_empty(info.uploader)
                .or_else(|| non_empty(info.channel))
                .unwrap_or(defaults.channel),
            duration_secs: info
                .duration
                .filter(|d| d.is_finite() && *d > 0.0)
                .map(|d| d.round() as u64)
                .unwrap_or(0),
            description: info.description.unwrap_or_default(),
            view_count: info.view_count,
            upload_date: non_empty(info.upload_date),
        }
    }
}

/// Fetch video metadata without downloading.
pub async fn fetch_metadata(runner: &ProcessRunner, url: &str) -> MediaResult<VideoContext> {
    check_ytdlp()?;
    info!("Fetching metadata for {}", url);

    let output = runner
        .output(
            "yt-dlp",
            ["--dump-json", "--no-download", "--no-playlist", "--no-warnings", url],
        )
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_ytdlp_failure(&stderr, MediaError::metadata_failed));
    }

    parse_metadata(&output.stdout)
}

fn parse_metadata(stdout: &[u8]) -> MediaResult<VideoContext> {
    let info: YtDlpInfo = serde_json::from_slice(stdout)?;
    Ok(info.into())
}

/// Download the video (at most 720p) into `dir` and return its path.
pub async fn download_video(runner: &ProcessRunner, url: &str, dir: &Path) -> MediaResult<PathBuf> {
    check_ytdlp()?;

    let template = dir.join(format!("{}.%(ext)s", VIDEO_STEM));
    let template = template.to_string_lossy().to_string();
    info!("Downloading video from {} into {}", url, dir.display());

    let output = runner
        .output(
            "yt-dlp",
            [
                "-f",
                "best[height<=720]/best",
                "--no-playlist",
                "--no-part",
                "-o",
                template.as_str(),
                url,
            ],
        )
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_ytdlp_failure(&stderr, MediaError::download_failed));
    }

    let path = find_downloaded(dir)?
        .ok_or_else(|| MediaError::download_failed("Output file not created"))?;

    let size = std::fs::metadata(&path)?.len();
    info!(
        output = %path.display(),
        size_mb = size as f64 / (1024.0 * 1024.0),
        "Downloaded video"
    );
    Ok(path)
}

/// Locate `video.<ext>` in `dir`, ignoring sidecar files.
fn find_downloaded(dir: &Path) -> MediaResult<Option<PathBuf>> {
    let mut found = None;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let stem_matches = path.file_stem().and_then(|s| s.to_str()) == Some(VIDEO_STEM);
        let sidecar = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("part" | "json" | "vtt" | "ytdl") | None
        );
        if stem_matches && !sidecar && path.is_file() {
            found = Some(path);
            break;
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_full() {
        let json = br#"{
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "uploader": "Rick Astley",
            "channel": "RickAstleyVEVO",
            "duration": 212.6,
            "description": "The official video",
            "view_count": 1500000000,
            "upload_date": "20091025"
        }"#;
        let ctx = parse_metadata(json).unwrap();
        assert_eq!(ctx.title, "Never Gonna Give You Up");
        assert_eq!(ctx.channel, "Rick Astley");
        assert_eq!(ctx.duration_secs, 213);
        assert_eq!(ctx.view_count, Some(1_500_000_000));
        assert_eq!(ctx.upload_date.as_deref(), Some("20091025"));
    }

    #[test]
    fn test_parse_metadata_defaults() {
        let ctx = parse_metadata(br#"{ "title": "", "duration": null }"#).unwrap();
        assert_eq!(ctx.title, "Unknown Title");
        assert_eq!(ctx.channel, "Unknown Channel");
        assert_eq!(ctx.duration_secs, 0);
        assert_eq!(ctx.description, "");
        assert!(ctx.view_count.is_none());
        assert!(ctx.upload_date.is_none());
    }

    #[test]
    fn test_find_downloaded_skips_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("video.part"), b"x").unwrap();
        std::fs::write(dir.path().join("video.en.vtt"), b"x").unwrap();
        assert!(find_downloaded(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join("video.mp4"), b"x").unwrap();
        assert_eq!(
            find_downloaded(dir.path()).unwrap(),
            Some(dir.path().join("video.mp4"))
        );
    }
}
