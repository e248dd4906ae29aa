//! OpenAI-compatible backend (ChatOpenAI) for the debate generator.
//!
//! Uses the Chat Completions API through `async_openai`. Requires `OPENAI_API_KEY` (or
//! explicit config). The model id is passed per call so the same [`RotatingGenerator`]
//! policy applies as for Gemini.
//!
//! [`RotatingGenerator`]: super::RotatingGenerator

use async_trait::async_trait;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs},
    Client,
};

use super::{parse_retry_delay, GenerateResponse, GenerationError, GenerationParams, ModelBackend};

/// OpenAI Chat Completions backend.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide config via
/// `ChatOpenAI::with_config` (custom key or base URL for compatible servers).
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
}

impl Default for ChatOpenAI {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig) -> Self {
        Self {
            client: Client::with_config(config),
        }
    }
}

/// Maps an API error (message plus optional error `type`/`code` string) to a
/// [`GenerationError`].
pub fn classify_openai_error(model: &str, message: &str, kind: Option<&str>) -> GenerationError {
    let kind = kind.unwrap_or_default().to_ascii_lowercase();
    let lower = message.to_ascii_lowercase();
    if kind.contains("rate_limit") || kind.contains("insufficient_quota") || lower.contains("rate limit") {
        GenerationError::RateLimited {
            model: model.to_string(),
            message: message.to_string(),
            retry_after: parse_retry_delay(message),
        }
    } else if kind.contains("model_not_found") || lower.contains("does not exist") {
        GenerationError::NotFound {
            model: model.to_string(),
            message: message.to_string(),
        }
    } else if kind.contains("invalid_api_key") || kind.contains("authentication") || lower.contains("api key") {
        GenerationError::Unauthorized(message.to_string())
    } else if kind.contains("invalid_request") {
        GenerationError::Api {
            status: 400,
            message: message.to_string(),
        }
    } else {
        GenerationError::Api {
            status: 500,
            message: message.to_string(),
        }
    }
}

fn map_openai_error(model: &str, err: OpenAIError) -> GenerationError {
    match err {
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.clone().or_else(|| api.code.clone());
            classify_openai_error(model, &api.message, kind.as_deref())
        }
        other => GenerationError::Transport(other.to_string()),
    }
}

#[async_trait]
impl ModelBackend for ChatOpenAI {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerateResponse, GenerationError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model.to_string());
        args.messages(vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage::from(prompt),
        )]);
        args.temperature(params.temperature);
        if let Some(max) = params.max_tokens {
            args.max_completion_tokens(max);
        }
        let request = args
            .build()
            .map_err(|e| GenerationError::Transport(format!("OpenAI request build failed: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| map_openai_error(model, e))?;

        let candidates = response
            .choices
            .into_iter()
            .map(|choice| choice.message.content.into_iter().collect())
            .collect();
        Ok(GenerateResponse {
            text: None,
            candidates,
        })
    }
}

#[cfg(all(test, feature = "openai"))]
mod tests {
    use super::*;

    /// **Scenario**: ChatOpenAI::with_config uses custom config.
    #[test]
    fn chat_openai_with_config_creates_client() {
        let config = OpenAIConfig::new().with_api_key("test-key");
        let _ = ChatOpenAI::with_config(config);
    }

    #[test]
    fn classify_rate_limit_with_delay() {
        let err = classify_openai_error(
            "gpt-4o-mini",
            "Rate limit reached. Please try again; retry in 2s.",
            Some("requests"),
        );
        assert!(matches!(
            err,
            GenerationError::RateLimited { retry_after: Some(d), .. } if d.as_secs() == 2
        ));
    }

    #[test]
    fn classify_missing_model_and_bad_key() {
        assert!(matches!(
            classify_openai_error("nope", "The model `nope` does not exist", None),
            GenerationError::NotFound { .. }
        ));
        assert!(matches!(
            classify_openai_error("m", "Incorrect API key provided", Some("invalid_request_error")),
            GenerationError::Unauthorized(_)
        ));
        assert!(matches!(
            classify_openai_error("m", "bad field", Some("invalid_request_error")),
            GenerationError::Api { status: 400, .. }
        ));
    }
}
