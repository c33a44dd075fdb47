//! Sampled frames and transcripts.

use std::fmt;

/// A single still image sampled from the video.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// MIME type of the encoded image (e.g. `image/jpeg`)
    pub mime_type: String,
    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a JPEG frame.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            data,
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Ordered sequence of frames sampled evenly across the video.
///
/// Frame `i` of `n` sits at `i * duration / n` seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Create a frame set from already-ordered frames.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// An empty frame set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Timestamp in seconds of the frame at `index` for a video of `duration_secs`.
    pub fn timestamp_of(&self, index: usize, duration_secs: u64) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        index as f64 * (duration_secs as f64 / self.frames.len() as f64)
    }

    /// The first `max` frames paired with their timestamps.
    pub fn leading(&self, max: usize, duration_secs: u64) -> Vec<(usize, f64, &Frame)> {
        self.frames
            .iter()
            .take(max)
            .enumerate()
            .map(|(i, frame)| (i, self.timestamp_of(i, duration_secs), frame))
            .collect()
    }
}

impl From<Vec<Frame>> for FrameSet {
    fn from(frames: Vec<Frame>) -> Self {
        Self::new(frames)
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Text transcript of the video's audio track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the transcript holds no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// First `max_chars` characters.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}

impl From<String> for Transcript {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Transcript {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> FrameSet {
        (0..n).map(|i| Frame::jpeg(vec![i as u8])).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_timestamps_follow_index_times_duration_over_count() {
        let set = frames(8);
        assert_eq!(set.timestamp_of(0, 120), 0.0);
        assert!((set.timestamp_of(1, 120) - 15.0).abs() < f64::EPSILON);
        assert!((set.timestamp_of(5, 120) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leading_caps_frames_but_keeps_full_count_spacing() {
        let set = frames(8);
        let leading = set.leading(6, 80);
        assert_eq!(leading.len(), 6);
        assert!((leading[5].1 - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_frame_set() {
        let set = FrameSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.timestamp_of(3, 100), 0.0);
        assert!(set.leading(6, 100).is_empty());
    }

    #[test]
    fn test_transcript_emptiness_ignores_whitespace() {
        assert!(Transcript::new("  \n ").is_empty());
        assert!(!Transcript::new("hello").is_empty());
        assert_eq!(Transcript::new("héllo").char_len(), 5);
        assert_eq!(Transcript::new("héllo").excerpt(2), "hé");
    }
}
