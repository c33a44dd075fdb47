//! Per-modality analysis step runners.
//!
//! Visual and audio runners call the model once and degrade on failure.
//! Metadata analysis is rule-based and never calls the model.

use std::sync::Arc;

use vsum_models::{
    AudioAnalysis, EngagementMetrics, FrameSet, MetadataAnalysis, Transcript, VideoContext,
    VisualAnalysis,
};

use crate::extract::InsightExtractor;
use crate::model::{BoundedModel, PromptPart};
use crate::prompts;

const SHORT_FORM_LIMIT_SECS: u64 = 300;
const MEDIUM_FORM_LIMIT_SECS: u64 = 1800;
const TITLE_PREFIX_CHARS: usize = 50;

#[derive(Clone)]
pub struct StepRunners {
    model: BoundedModel,
    extractor: Arc<dyn InsightExtractor>,
}

impl StepRunners {
    pub fn new(model: BoundedModel, extractor: Arc<dyn InsightExtractor>) -> Self {
        Self { model, extractor }
    }

    /// Analyze up to six frames. A failed call yields a degraded record.
    pub async fn visual(&self, video: &VideoContext, frames: &FrameSet) -> VisualAnalysis {
        let parts = prompts::visual_prompt(video, frames);
        match self.model.call("visual", &parts).await {
            Ok(text) => VisualAnalysis {
                key_insights: self.extractor.key_insights(&text),
                visual_themes: self.extractor.visual_themes(&text),
                frames_processed: frames.len(),
                analysis: text,
                error: None,
            },
            Err(e) => VisualAnalysis::unavailable(e.to_string()),
        }
    }

    /// Analyze the transcript. A failed call yields a degraded record.
    pub async fn audio(&self, video: &VideoContext, transcript: &Transcript) -> AudioAnalysis {
        let prompt = prompts::audio_prompt(video, transcript);
        match self.model.call("audio", &[PromptPart::Text(prompt)]).await {
            Ok(text) => AudioAnalysis {
                key_topics: self.extractor.key_topics(&text),
                tone_analysis: self.extractor.tone(&text),
                transcript_length: transcript.char_len(),
                analysis: text,
                error: None,
            },
            Err(e) => AudioAnalysis::unavailable(e.to_string()),
        }
    }
}

/// Rule-based metadata analysis.
pub fn analyze_metadata(video: &VideoContext) -> MetadataAnalysis {
    MetadataAnalysis {
        title_analysis: analyze_title(&video.title),
        channel_context: video.channel.clone(),
        duration_analysis: analyze_duration(video.duration_secs).to_string(),
        description_insights: analyze_description(&video.description),
        engagement_metrics: EngagementMetrics {
            view_count: video.view_count_label(),
            upload_date: video.upload_date_label(),
        },
    }
}

fn analyze_title(title: &str) -> String {
    let prefix: String = title.chars().take(TITLE_PREFIX_CHARS).collect();
    format!("Title suggests: {}...", prefix)
}

fn analyze_duration(duration_secs: u64) -> &'static str {
    if duration_secs < SHORT_FORM_LIMIT_SECS {
        "Short-form content"
    } else if duration_secs < MEDIUM_FORM_LIMIT_SECS {
        "Medium-form content"
    } else {
        "Long-form content"
    }
}

fn analyze_description(description: &str) -> String {
    format!("Description length: {} characters", description.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PlaceholderExtractor;
    use crate::testing::ScriptedModel;
    use std::time::Duration;
    use tokio::sync::watch;
    use vsum_models::Frame;

    fn runners(model: ScriptedModel) -> StepRunners {
        let (_tx, rx) = watch::channel(false);
        let bounded = BoundedModel::new(Arc::new(model), Duration::from_secs(5), rx);
        StepRunners::new(bounded, Arc::new(PlaceholderExtractor))
    }

    fn frames(n: u8) -> FrameSet {
        (0..n).map(|i| Frame::jpeg(vec![i])).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_duration_buckets() {
        assert_eq!(analyze_duration(0), "Short-form content");
        assert_eq!(analyze_duration(299), "Short-form content");
        assert_eq!(analyze_duration(300), "Medium-form content");
        assert_eq!(analyze_duration(1799), "Medium-form content");
        assert_eq!(analyze_duration(1800), "Long-form content");
    }

    #[test]
    fn test_metadata_analysis() {
        let video = VideoContext::new("a".repeat(80), "Channel", 600)
            .with_description("twelve chars")
            .with_view_count(42);
        let m = analyze_metadata(&video);

        assert_eq!(m.title_analysis, format!("Title suggests: {}...", "a".repeat(50)));
        assert_eq!(m.channel_context, "Channel");
        assert_eq!(m.duration_analysis, "Medium-form content");
        assert_eq!(m.description_insights, "Description length: 12 characters");
        assert_eq!(m.engagement_metrics.view_count, "42");
        assert_eq!(m.engagement_metrics.upload_date, "N/A");
    }

    #[tokio::test]
    async fn test_visual_success_uses_extractor() {
        let r = runners(ScriptedModel::always("lots of crabs"));
        let video = VideoContext::new("t", "c", 60);
        let v = r.visual(&video, &frames(8)).await;

        assert_eq!(v.analysis, "lots of crabs");
        assert_eq!(v.frames_processed, 8);
        assert_eq!(v.key_insights, vec!["Key insight extracted from analysis"]);
        assert_eq!(v.visual_themes, vec!["Visual theme identified"]);
        assert!(v.error.is_none());
    }

    #[tokio::test]
    async fn test_visual_failure_degrades() {
        let r = runners(ScriptedModel::failing());
        let v = r.visual(&VideoContext::default(), &frames(2)).await;
        assert_eq!(v.analysis, "Visual analysis unavailable");
        assert!(v.error.unwrap().contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_audio_success_and_failure() {
        let video = VideoContext::default();
        let transcript = Transcript::new("hello world");

        let ok = runners(ScriptedModel::always("calm tone")).audio(&video, &transcript).await;
        assert_eq!(ok.analysis, "calm tone");
        assert_eq!(ok.transcript_length, 11);
        assert_eq!(ok.key_topics, vec!["Key topic identified"]);
        assert_eq!(ok.tone_analysis, "Tone analysis completed");

        let failed = runners(ScriptedModel::failing()).audio(&video, &transcript).await;
        assert_eq!(failed.analysis, "Audio analysis unavailable");
        assert!(failed.error.is_some());
    }
}
