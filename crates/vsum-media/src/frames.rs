//! Evenly spaced still frames.

use std::path::Path;

use tracing::{debug, warn};
use vsum_models::{Frame, FrameSet};

use crate::command::{FfmpegCommand, ProcessRunner};
use crate::probe::probe_video;

/// Timestamps for `count` frames spread over `duration` seconds: `i * duration / count`.
pub fn frame_timestamps(duration: f64, count: usize) -> Vec<f64> {
    if count == 0 || !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }
    (0..count)
        .map(|i| i as f64 * duration / count as f64)
        .collect()
}

/// Extract `count` JPEG stills from `video`, writing scratch files into `dir`.
///
/// Never fails: a probe failure yields an empty set, and individual frames
/// that cannot be extracted are skipped.
pub async fn extract_frames(
    runner: &ProcessRunner,
    video: &Path,
    dir: &Path,
    count: usize,
) -> FrameSet {
    let info = match probe_video(runner, video).await {
        Ok(info) => info,
        Err(e) => {
            warn!(video = %video.display(), error = %e, "Could not probe video, no frames extracted");
            return FrameSet::empty();
        }
    };

    let mut frames = Vec::with_capacity(count);
    for (i, ts) in frame_timestamps(info.duration, count).into_iter().enumerate() {
        let out = dir.join(format!("frame_{:03}.jpg", i));
        let cmd = FfmpegCommand::new(video, &out)
            .seek(ts)
            .single_frame()
            .jpeg_quality(2);

        if let Err(e) = runner.run_ffmpeg(&cmd).await {
            warn!(index = i, timestamp = ts, error = %e, "Frame extraction failed, skipping");
            continue;
        }

        match tokio::fs::read(&out).await {
            Ok(data) if !data.is_empty() => {
                debug!(index = i, timestamp = ts, bytes = data.len(), "Extracted frame");
                frames.push(Frame::jpeg(data));
            }
            Ok(_) => warn!(index = i, "Extracted frame was empty, skipping"),
            Err(e) => warn!(index = i, error = %e, "Could not read extracted frame, skipping"),
        }
        tokio::fs::remove_file(&out).await.ok();
    }

    FrameSet::new(frames)
}
