//! Prompt builders.
//!
//! Pure functions from structured context to prompt parts. No I/O, no state.

use vsum_models::{AnalysisResults, FrameSet, InputInventory, Transcript, VideoContext};

use crate::config::{MAX_PLAN_DESCRIPTION_CHARS, MAX_TRANSCRIPT_CHARS, MAX_VISUAL_FRAMES};
use crate::model::PromptPart;

pub(crate) const PLAN_HEADER: &str =
    "You are a video analysis agent. Draft an analysis plan for this video.";
pub(crate) const VISUAL_HEADER: &str =
    "You are an expert video content analyst. Study these visual frames.";
pub(crate) const AUDIO_HEADER: &str =
    "You are an expert audio content analyst. Study this audio transcript.";
pub(crate) const SYNTHESIS_HEADER: &str =
    "You are an expert content synthesizer. Combine these analysis results into one video summary.";
pub(crate) const REFINEMENT_HEADER: &str =
    "You are an expert editor. Improve this video summary.";

/// Planning prompt: input inventory plus truncated video context.
pub fn planning_prompt(inventory: &InputInventory, video: &VideoContext) -> String {
    format!(
        r#"{PLAN_HEADER}

Available data:
- Video metadata: {has_metadata}
- Visual frames: {frame_count} frames
- Audio transcript: {has_audio}
- Duration: {duration} seconds

Video information:
- Title: {title}
- Channel: {channel}
- Description: {description}...

Lay out a step-by-step plan covering:
1. The priority order of analysis steps
2. The insights expected from each step
3. How the results should be combined
4. Quality criteria for the final summary

Answer in a structured format."#,
        has_metadata = inventory.has_metadata,
        frame_count = inventory.frame_count,
        has_audio = inventory.has_audio,
        duration = inventory.duration_secs,
        title = video.title,
        channel = video.channel,
        description = video.description_excerpt(MAX_PLAN_DESCRIPTION_CHARS),
    )
}

/// Visual prompt: instructions followed by up to six labelled frames.
///
/// Timestamps are spaced over the full supplied frame count, not the capped one.
pub fn visual_prompt(video: &VideoContext, frames: &FrameSet) -> Vec<PromptPart> {
    let header = format!(
        r#"{VISUAL_HEADER}

Video context:
- Title: {title}
- Duration: {duration} seconds

For each frame, identify:
1. Main visual elements and composition
2. On-screen text, if any
3. People, objects or scenes
4. Recurring visual themes
5. Technical quality and production style

Then give an overall visual analysis that captures what the video is about."#,
        title = video.title,
        duration = video.duration_secs,
    );

    let mut parts = Vec::with_capacity(1 + 2 * MAX_VISUAL_FRAMES);
    parts.push(PromptPart::Text(header));
    for (i, timestamp, frame) in frames.leading(MAX_VISUAL_FRAMES, video.duration_secs) {
        parts.push(PromptPart::Text(frame_label(i, timestamp)));
        parts.push(PromptPart::Image(frame.clone()));
    }
    parts
}

pub(crate) fn frame_label(index: usize, timestamp_secs: f64) -> String {
    format!("Frame {} (timestamp: {:.1}s):", index + 1, timestamp_secs)
}

/// Audio prompt embedding the first 2000 transcript characters.
pub fn audio_prompt(video: &VideoContext, transcript: &Transcript) -> String {
    format!(
        r#"{AUDIO_HEADER}

Video title: {title}
Transcript: {excerpt}

Analyze:
1. Speech patterns and communication style
2. Key topics and themes discussed
3. Emotional tone and delivery
4. Information density and structure
5. Technical or specialized terminology

Focus on insights that complement a visual analysis."#,
        title = video.title,
        excerpt = transcript.excerpt(MAX_TRANSCRIPT_CHARS),
    )
}

/// Synthesis prompt over every accumulated record.
pub fn synthesis_prompt(video: &VideoContext, results: &AnalysisResults) -> String {
    format!(
        r#"{SYNTHESIS_HEADER}

Video: {title}
Channel: {channel}
Duration: {duration} seconds

Analysis results:
{records}

Write a well-structured summary with these sections:
1. Executive Summary (2-3 sentences)
2. Visual Content Overview
3. Key Topics and Themes
4. Main Insights and Takeaways
5. Production Quality and Style Notes

Keep it engaging, informative and comprehensive."#,
        title = video.title,
        channel = video.channel,
        duration = video.duration_secs,
        records = records_json(results),
    )
}

/// Refinement prompt carrying the draft and the records it was built from.
pub fn refinement_prompt(draft: &str, results: &AnalysisResults) -> String {
    format!(
        r#"{REFINEMENT_HEADER}

Current summary:
{draft}

Available analysis data:
{records}

Improve it by:
1. Making it more engaging and readable
2. Adding specific details from the analysis
3. Improving structure and flow
4. Ensuring comprehensive coverage
5. Adding compelling insights

Return only the refined summary."#,
        records = records_json(results),
    )
}

fn records_json(results: &AnalysisResults) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsum_models::{Frame, Modality, VisualAnalysis};

    fn video() -> VideoContext {
        VideoContext::new("Rust Ownership", "Crab Channel", 120)
            .with_description("d".repeat(500))
    }

    #[test]
    fn test_planning_prompt_truncates_description() {
        let inventory = InputInventory {
            has_metadata: true,
            frame_count: 8,
            has_audio: false,
            duration_secs: 120,
        };
        let prompt = planning_prompt(&inventory, &video());
        assert!(prompt.contains("Visual frames: 8 frames"));
        assert!(prompt.contains("Audio transcript: false"));
        assert!(prompt.contains(&format!("Description: {}...", "d".repeat(200))));
        assert!(!prompt.contains(&"d".repeat(201)));
    }

    #[test]
    fn test_visual_prompt_caps_frames_and_labels_timestamps() {
        let frames: FrameSet = (0..8).map(|i| Frame::jpeg(vec![i])).collect::<Vec<_>>().into();
        let parts = visual_prompt(&video(), &frames);

        let images = parts.iter().filter(|p| p.is_image()).count();
        assert_eq!(images, 6);
        assert_eq!(parts.len(), 1 + 12);
        assert_eq!(parts[1].as_text(), Some("Frame 1 (timestamp: 0.0s):"));
        // 120s over 8 supplied frames puts frame 2 at 15s
        assert_eq!(parts[3].as_text(), Some("Frame 2 (timestamp: 15.0s):"));
        assert_eq!(parts[11].as_text(), Some("Frame 6 (timestamp: 75.0s):"));
    }

    #[test]
    fn test_audio_prompt_truncates_transcript() {
        let transcript = Transcript::new("x".repeat(5000));
        let prompt = audio_prompt(&video(), &transcript);
        assert!(prompt.contains(&"x".repeat(2000)));
        assert!(!prompt.contains(&"x".repeat(2001)));
    }

    #[test]
    fn test_synthesis_prompt_embeds_records() {
        let mut results = AnalysisResults::new();
        results.insert(Modality::Visual, VisualAnalysis::unavailable("boom").into());
        let prompt = synthesis_prompt(&video(), &results);
        assert!(prompt.contains("Visual analysis unavailable"));
        assert!(prompt.contains("Duration: 120 seconds"));
        assert!(prompt.contains("Executive Summary"));
    }

    #[test]
    fn test_refinement_prompt_contains_draft() {
        let prompt = refinement_prompt("my draft", &AnalysisResults::new());
        assert!(prompt.starts_with(REFINEMENT_HEADER));
        assert!(prompt.contains("my draft"));
    }
}
