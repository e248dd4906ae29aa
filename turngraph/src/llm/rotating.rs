//! Candidate-model rotation and the rate-limit / empty-response retry policy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{GenerationError, GenerationParams, ModelBackend, RetryPolicy, TextGenerator};

/// Candidate list used when no override is configured.
pub const DEFAULT_GEMINI_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.5-pro",
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-flash-latest",
];

/// Ordered, de-duplicated candidate list: `preferred` first, then the override list (or
/// [`DEFAULT_GEMINI_MODELS`] when the override is empty). Blank entries are dropped.
pub fn build_candidates(preferred: Option<&str>, override_list: &[String]) -> Vec<String> {
    let base: Vec<&str> = if override_list.iter().any(|m| !m.trim().is_empty()) {
        override_list.iter().map(|m| m.trim()).collect()
    } else {
        DEFAULT_GEMINI_MODELS.to_vec()
    };
    let mut out: Vec<String> = Vec::new();
    for model in preferred.map(str::trim).into_iter().chain(base) {
        if !model.is_empty() && !out.iter().any(|m| m == model) {
            out.push(model.to_string());
        }
    }
    out
}

/// Round-robin start index over a candidate list, owned by one generator instance.
#[derive(Debug, Default)]
pub struct ModelRotation {
    cursor: AtomicUsize,
}

impl ModelRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the candidates rotated to start at the cursor, then advances the cursor by one.
    pub fn next_order<'a>(&self, candidates: &'a [String]) -> Vec<&'a str> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % candidates.len();
        candidates[start..]
            .iter()
            .chain(&candidates[..start])
            .map(String::as_str)
            .collect()
    }
}

/// [`TextGenerator`] that spreads calls across candidate models of one backend.
///
/// Per call: rotate the candidate order, then sweep it up to `policy.passes` times. Not-found
/// and rate-limited models are skipped; an empty answer is retried once in place with
/// [`GenerationParams::relaxed`]. When the first sweep saw any rate limit, sleep
/// [`RetryPolicy::backoff`] of the smallest suggested delay and sweep again. Unauthorized is
/// returned immediately; any other error ends the sweep. The last error is returned when
/// nothing produced text.
pub struct RotatingGenerator<B> {
    backend: B,
    candidates: Vec<String>,
    rotation: ModelRotation,
    policy: RetryPolicy,
}

impl<B: ModelBackend> RotatingGenerator<B> {
    pub fn new(backend: B, candidates: Vec<String>) -> Self {
        Self {
            backend,
            candidates,
            rotation: ModelRotation::new(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(self, policy: RetryPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// One model: a call, plus the relaxed retry when it came back empty.
    async fn try_model(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let text = self
            .backend
            .generate_content(model, prompt, params)
            .await?
            .into_text();
        if !text.is_empty() {
            return Ok(text);
        }
        let relaxed = params.relaxed();
        debug!(model, max_tokens = ?relaxed.max_tokens, "empty response, retrying with relaxed cap");
        let text = self
            .backend
            .generate_content(model, prompt, &relaxed)
            .await?
            .into_text();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse {
                model: model.to_string(),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl<B: ModelBackend> TextGenerator for RotatingGenerator<B> {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let order = self.rotation.next_order(&self.candidates);
        if order.is_empty() {
            return Err(GenerationError::NoCandidates);
        }

        let mut last_err: Option<GenerationError> = None;
        let mut rate_waits: Vec<Duration> = Vec::new();
        for pass in 0..self.policy.passes {
            for model in &order {
                match self.try_model(model, prompt, &params).await {
                    Ok(text) => return Ok(text),
                    Err(GenerationError::RateLimited {
                        model,
                        message,
                        retry_after,
                    }) => {
                        let wait = retry_after.unwrap_or(self.policy.default_backoff);
                        warn!(%model, pass, wait_secs = wait.as_secs_f64(), "rate limited, trying next model");
                        rate_waits.push(wait);
                        last_err = Some(GenerationError::RateLimited {
                            model,
                            message,
                            retry_after,
                        });
                    }
                    Err(err @ GenerationError::Unauthorized(_)) => return Err(err),
                    Err(err) if err.is_transient() => {
                        warn!(model = %model, pass, error = %err, "model unavailable, trying next model");
                        last_err = Some(err);
                    }
                    Err(err) => {
                        warn!(model = %model, pass, error = %err, "generation failed, ending sweep");
                        last_err = Some(err);
                        break;
                    }
                }
            }
            let is_last_pass = pass + 1 >= self.policy.passes;
            if pass != 0 || is_last_pass {
                break;
            }
            let Some(suggested) = rate_waits.iter().min().copied() else {
                break;
            };
            let sleep_for = self.policy.backoff(suggested);
            info!(sleep_secs = sleep_for.as_secs_f64(), "all candidates rate limited, backing off before second pass");
            tokio::time::sleep(sleep_for).await;
            rate_waits.clear();
        }
        Err(last_err.unwrap_or(GenerationError::NoCandidates))
    }
}
