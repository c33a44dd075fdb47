//! Gemini client implementing [`GenerativeModel`].
//!
//! Sends text and inline JPEG parts to `generateContent`, trying each
//! configured model in order until one answers.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::model::{GenerativeModel, PromptPart};

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    models: Vec<String>,
    display_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GeminiClient {
    /// Create a client from agent config. Fails when no API key is set.
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        config.validate()?;
        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            models: config.gemini_models.clone(),
            display_name: config.gemini_models.join(","),
            client: Client::new(),
        })
    }

    async fn call_gemini_api(&self, model: &str, parts: &[PromptPart]) -> AgentResult<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let request = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: parts.iter().map(to_wire_part).collect(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::transport(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AgentError::transport(format!("Failed to parse Gemini response: {}", e)))?;

        let text: String = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        &self.display_name
    }

    async fn generate(&self, parts: &[PromptPart]) -> AgentResult<String> {
        let mut last_error = None;

        for model in &self.models {
            info!("Attempting Gemini API with model: {}", model);
            match self.call_gemini_api(model, parts).await {
                Ok(text) => {
                    info!("Got {} chars from {}", text.len(), model);
                    return Ok(text);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!("Failed with model {}: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AgentError::config_error("No Gemini models configured")))
    }
}

fn to_wire_part(part: &PromptPart) -> Part<'_> {
    match part {
        PromptPart::Text(text) => Part::Text { text: text.as_str() },
        PromptPart::Image(frame) => Part::Inline {
            inline_data: InlineData {
                mime_type: &frame.mime_type,
                data: BASE64.encode(&frame.data),
            },
        },
    }
}

fn classify_failure(status: StatusCode, body: &str) -> AgentError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => (env.error.message, env.error.status),
        Err(_) => (body.to_string(), String::new()),
    };

    if status == StatusCode::TOO_MANY_REQUESTS || api_status == "RESOURCE_EXHAUSTED" {
        return AgentError::quota_exceeded(message);
    }
    AgentError::api(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vsum_models::Frame;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, models: &[&str]) -> GeminiClient {
        let config = AgentConfig {
            gemini_api_key: "test-key".into(),
            gemini_models: models.iter().map(|m| m.to_string()).collect(),
            gemini_base_url: server.uri(),
            ..Default::default()
        };
        GeminiClient::new(&config).unwrap()
    }

    fn ok_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
        })
    }

    #[tokio::test]
    async fn test_generate_sends_text_and_inline_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-a:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "describe" },
                        { "inline_data": { "mime_type": "image/jpeg", "data": "AQID" } }
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("a cat")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, &["gemini-a"]);
        let parts = vec![
            PromptPart::text("describe"),
            PromptPart::Image(Frame::jpeg(vec![1, 2, 3])),
        ];
        assert_eq!(client.generate(&parts).await.unwrap(), "a cat");
    }

    #[tokio::test]
    async fn test_falls_back_to_next_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-a:generateContent"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-b:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("from b")))
            .mount(&server)
            .await;

        let client = client_for(&server, &["gemini-a", "gemini-b"]);
        let text = client.generate(&[PromptPart::text("hi")]).await.unwrap();
        assert_eq!(text, "from b");
    }

    #[tokio::test]
    async fn test_quota_error_is_detected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, &["gemini-a"]);
        let err = client.generate(&[PromptPart::text("hi")]).await.unwrap_err();
        assert!(err.is_quota_exceeded(), "got {err:?}");
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, &["gemini-a"]);
        let err = client.generate(&[PromptPart::text("hi")]).await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyResponse));
    }

    #[test]
    fn test_new_requires_api_key() {
        let err = GeminiClient::new(&AgentConfig::default()).err().unwrap();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn test_classify_failure_plain_body() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "nope");
        assert!(matches!(err, AgentError::Api { status: 400, .. }));
    }
}
