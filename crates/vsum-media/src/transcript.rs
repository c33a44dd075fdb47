//! Subtitle-based transcripts via yt-dlp.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};
use vsum_models::Transcript;

use crate::command::{check_ytdlp, stderr_tail, ProcessRunner};
use crate::error::{MediaError, MediaResult};

/// Fetch a timestamped transcript for `url`, downloading subtitles into `dir`.
///
/// Returns `Ok(None)` when the video has no usable captions.
pub async fn fetch_transcript(
    runner: &ProcessRunner,
    url: &str,
    dir: &Path,
    sub_langs: &str,
) -> MediaResult<Option<Transcript>> {
    check_ytdlp()?;
    info!("Fetching transcript for {} using yt-dlp", url);

    let template = dir.join("subs.%(ext)s").to_string_lossy().to_string();
    let output = runner
        .output(
            "yt-dlp",
            [
                "--write-auto-sub",
                "--write-sub",
                "--sub-lang",
                sub_langs,
                "--skip-download",
                "--sub-format",
                "vtt",
                "--no-playlist",
                "--output",
                template.as_str(),
                url,
            ],
        )
        .await?;

    if !output.status.success() {
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed to download subtitles: {}",
            stderr_tail(&output.stderr)
        )));
    }

    let Some(vtt_path) = pick_vtt(dir)? else {
        warn!("No subtitle file downloaded, video may not have captions");
        return Ok(None);
    };

    let content = tokio::fs::read_to_string(&vtt_path).await?;
    let transcript = Transcript::new(parse_vtt(&content));
    Ok((!transcript.is_empty()).then_some(transcript))
}

/// Pick a downloaded VTT file, preferring English tracks.
fn pick_vtt(dir: &Path) -> MediaResult<Option<PathBuf>> {
    let mut vtt_files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("vtt"))
        .collect();

    vtt_files.sort_by_key(|path| {
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        (!name.contains(".en"), name)
    });

    Ok(vtt_files.into_iter().next())
}

fn cue_timing() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"((?:\d{2}:)?\d{2}:\d{2}\.\d{3}) -->.*").expect("valid cue timing regex")
    })
}

fn inline_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag regex"))
}

/// Parse WebVTT into `[HH:MM:SS] text` lines, collapsing rolling captions.
pub fn parse_vtt(content: &str) -> String {
    let mut transcript = String::new();
    let mut current_ts = "00:00:00".to_string();
    let mut previous = String::new();
    let mut in_header_block = false;

    for raw in content.lines() {
        let line = inline_tag().replace_all(raw.trim(), "").trim().to_string();

        if line.is_empty() {
            in_header_block = false;
            continue;
        }
        if line.starts_with("WEBVTT") || line.starts_with("NOTE") || line.starts_with("STYLE") {
            in_header_block = true;
            continue;
        }
        if in_header_block || line.starts_with("Kind:") || line.starts_with("Language:") {
            continue;
        }

        if let Some(caps) = cue_timing().captures(&line) {
            let ts = &caps[1];
            let ts = ts.split('.').next().unwrap_or(ts);
            current_ts = if ts.split(':').count() == 2 {
                format!("00:{}", ts)
            } else {
                ts.to_string()
            };
            continue;
        }

        // Cue identifiers
        if line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        if line != previous {
            transcript.push_str(&format!("[{}] {}\n", current_ts, line));
            previous = line;
        }
    }

    transcript
}
