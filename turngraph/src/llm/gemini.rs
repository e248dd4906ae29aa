//! Gemini backend: one `generateContent` call against one named model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::gemini_types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    RequestPart,
};
use super::{parse_retry_delay, GenerateResponse, GenerationError, GenerationParams, ModelBackend};

/// REST base used when `GEMINI_API_BASE` is not set.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini REST API.
///
/// Wrap in [`RotatingGenerator`](super::RotatingGenerator) to get candidate rotation and
/// back-off; on its own it makes exactly one request per call.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    /// Client with the default base URL. Request timeout 120s, connect timeout 10s.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }

    /// Overrides the REST base (proxies, local emulators).
    pub fn with_api_base(self, api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ..self
        }
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    fn build_request(prompt: &str, params: &GenerationParams) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        }
    }
}

/// Maps a non-success HTTP response to a [`GenerationError`].
///
/// 404 is a missing model, 429 a rate limit (delay parsed from the body), 401/403 bad
/// credentials. Gemini reports a rejected key as 400 `API_KEY_INVALID`, which is also
/// treated as bad credentials. The API message is preferred over the raw body when it parses.
pub fn classify_http_error(model: &str, status: u16, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    match status {
        404 => GenerationError::NotFound {
            model: model.to_string(),
            message,
        },
        429 => GenerationError::RateLimited {
            model: model.to_string(),
            retry_after: parse_retry_delay(body),
            message,
        },
        401 | 403 => GenerationError::Unauthorized(message),
        400 if is_invalid_key(body) => GenerationError::Unauthorized(message),
        _ => GenerationError::Api { status, message },
    }
}

fn is_invalid_key(body: &str) -> bool {
    body.contains("API_KEY_INVALID") || body.contains("API key not valid")
}

impl From<GenerateContentResponse> for GenerateResponse {
    fn from(resp: GenerateContentResponse) -> Self {
        let candidates = resp
            .candidates
            .into_iter()
            .map(|c| {
                c.content
                    .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
                    .unwrap_or_default()
            })
            .collect();
        GenerateResponse {
            text: None,
            candidates,
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerateResponse, GenerationError> {
        let request = Self::build_request(prompt, params);
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_error(model, status.as_u16(), &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        if let Some(err) = body.error {
            return Err(GenerationError::Api {
                status: err.code.unwrap_or(500),
                message: err.message,
            });
        }
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_404_as_not_found() {
        let body = r#"{"error":{"code":404,"message":"models/x is not found","status":"NOT_FOUND"}}"#;
        let err = classify_http_error("x", 404, body);
        assert_eq!(
            err,
            GenerationError::NotFound {
                model: "x".into(),
                message: "models/x is not found".into()
            }
        );
    }

    #[test]
    fn classify_429_parses_retry_delay() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded. Please retry in 7.5s."}}"#;
        match classify_http_error("m", 429, body) {
            GenerationError::RateLimited { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_millis(7500)));
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn classify_auth_and_other_statuses() {
        assert!(matches!(
            classify_http_error("m", 403, "denied"),
            GenerationError::Unauthorized(m) if m == "denied"
        ));
        assert!(matches!(
            classify_http_error("m", 500, "oops"),
            GenerationError::Api { status: 500, .. }
        ));
    }

    /// **Scenario**: A 400 rejecting the key is bad credentials; other 400s stay API errors.
    #[test]
    fn classify_400_invalid_key_as_unauthorized() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        assert!(matches!(
            classify_http_error("m", 400, body),
            GenerationError::Unauthorized(m) if m == "API key not valid. Please pass a valid API key."
        ));
        let bad_request = r#"{"error":{"code":400,"message":"Invalid JSON payload","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            classify_http_error("m", 400, bad_request),
            GenerationError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn endpoint_strips_models_prefix() {
        let client = GeminiClient::new("k").with_api_base("http://localhost:9/v1beta/");
        assert_eq!(
            client.endpoint("models/gemini-2.5-flash"),
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_serializes_generation_config() {
        let req = GeminiClient::build_request("hi", &GenerationParams::new(0.2, 96));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 96);
    }

    #[test]
    fn response_normalizes_candidate_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"inlineData":{}},{"text":"b"}]}},{"finishReason":"SAFETY"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let resp: GenerateResponse = parsed.into();
        assert_eq!(resp.candidates.len(), 2);
        assert_eq!(resp.into_text(), "a\nb");
    }
}
