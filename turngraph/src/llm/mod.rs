//! Text-generation collaborator for the debate pipeline.
//!
//! Nodes depend on [`TextGenerator`]: a prompt plus [`GenerationParams`] in, text out.
//! Real backends implement the narrower [`ModelBackend`] (one call against one named model)
//! and are wrapped in [`RotatingGenerator`], which owns the candidate rotation and the
//! rate-limit/empty-response retry policy. Backends normalize their wire format into
//! [`GenerateResponse`] before it reaches the policy.

mod error;
mod mock;
mod response;
mod retry;
mod rotating;

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(feature = "gemini")]
mod gemini_types;
#[cfg(feature = "openai")]
mod openai;

pub use error::GenerationError;
pub use mock::{GenerateCall, MockLlm, JUDGE_FORMAT_MARKER, MEMORY_ROUTE_MARKER, SUMMARY_MARKER};
pub use response::GenerateResponse;
pub use retry::{parse_retry_delay, RetryPolicy};
pub use rotating::{build_candidates, ModelRotation, RotatingGenerator, DEFAULT_GEMINI_MODELS};

#[cfg(feature = "gemini")]
pub use gemini::{classify_http_error, GeminiClient, DEFAULT_GEMINI_API_BASE};
#[cfg(feature = "openai")]
pub use openai::{classify_openai_error, ChatOpenAI};

use async_trait::async_trait;

/// Token cap used when an empty response is retried in place.
pub const RELAXED_MAX_TOKENS_CAP: u32 = 256;

/// Sampling parameters for one generation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature; lower is more deterministic.
    pub temperature: f32,
    /// Output token cap; `None` leaves the backend default.
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens: Some(max_tokens),
        }
    }

    /// Params for the in-place retry after an empty response: cap raised by 64, at most 256.
    pub fn relaxed(&self) -> Self {
        Self {
            temperature: self.temperature,
            max_tokens: self
                .max_tokens
                .map(|m| m.saturating_add(64).min(RELAXED_MAX_TOKENS_CAP)),
        }
    }
}

/// Generation collaborator used by debate nodes.
///
/// Implementations: [`RotatingGenerator`] over a real backend, [`MockLlm`] for tests and
/// offline runs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`. Errors are final: any retry policy has already run.
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError>;
}

/// One call against one named model, normalized to [`GenerateResponse`].
///
/// Implementations: [`GeminiClient`] (feature `gemini`), [`ChatOpenAI`] (feature `openai`).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerateResponse, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxed_params_raise_cap_by_64_up_to_256() {
        assert_eq!(GenerationParams::new(0.7, 64).relaxed().max_tokens, Some(128));
        assert_eq!(GenerationParams::new(0.7, 200).relaxed().max_tokens, Some(256));
        let uncapped = GenerationParams {
            temperature: 0.3,
            max_tokens: None,
        };
        assert_eq!(uncapped.relaxed(), uncapped);
    }
}
