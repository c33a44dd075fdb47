//! YouTube URL validation.
//!
//! Only a fixed set of YouTube hosts is accepted. Anything else is rejected
//! before any external tool is invoked.

use thiserror::Error;
use url::Url;

/// Hosts accepted as YouTube sources.
pub const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

/// Path prefixes that carry the id as their next segment.
const ID_PATH_PREFIXES: &[&str] = &["embed", "v", "shorts", "live"];

/// Errors that can occur while validating a YouTube URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YoutubeIdError {
    #[error("URL could not be parsed")]
    Malformed,

    #[error("URL is not a valid YouTube URL")]
    InvalidYoutubeUrl,

    #[error("Video ID has invalid format")]
    InvalidVideoId,

    #[error("Video ID not found in URL")]
    VideoIdNotFound,
}

pub type YoutubeIdResult<T> = Result<T, YoutubeIdError>;

/// Extract the 11-character video id from a YouTube URL.
///
/// Accepted shapes:
/// - `https://www.youtube.com/watch?v=ID`
/// - `https://youtu.be/ID`
/// - `https://youtube.com/{embed,v,shorts,live}/ID`
///
/// A missing scheme is tolerated (`youtu.be/ID`).
pub fn extract_youtube_id(raw: &str) -> YoutubeIdResult<String> {
    let url = parse_lenient(raw)?;

    let host = url
        .host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or(YoutubeIdError::InvalidYoutubeUrl)?;
    if !YOUTUBE_HOSTS.contains(&host.as_str()) {
        return Err(YoutubeIdError::InvalidYoutubeUrl);
    }

    let mut segments = url.path_segments().into_iter().flatten().filter(|s| !s.is_empty());

    let candidate = if host == "youtu.be" {
        segments.next().map(str::to_string)
    } else {
        match segments.next() {
            Some("watch") | None => url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned()),
            Some(prefix) if ID_PATH_PREFIXES.contains(&prefix) => segments.next().map(str::to_string),
            Some(_) => None,
        }
    };

    let id = candidate.ok_or(YoutubeIdError::VideoIdNotFound)?;
    validate_youtube_id(&id)?;
    Ok(id)
}

/// True when `raw` is a YouTube URL carrying a well-formed video id.
pub fn is_youtube_url(raw: &str) -> bool {
    extract_youtube_id(raw).is_ok()
}

fn parse_lenient(raw: &str) -> YoutubeIdResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(YoutubeIdError::Malformed);
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(_) => Err(YoutubeIdError::InvalidYoutubeUrl),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{trimmed}")).map_err(|_| YoutubeIdError::Malformed)
        }
        Err(_) => Err(YoutubeIdError::Malformed),
    }
}

fn validate_youtube_id(id: &str) -> YoutubeIdResult<()> {
    let well_formed =
        id.len() == 11 && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        Ok(())
    } else {
        Err(YoutubeIdError::InvalidVideoId)
    }
}
