//! Text generator selection for the debate.
//!
//! Real providers are wrapped in [`RotatingGenerator`] so rotation and rate-limit back-off
//! apply the same way; missing keys fail here, before any node runs.

use std::sync::Arc;

use turngraph::llm::{MockLlm, TextGenerator};
#[cfg(any(feature = "gemini", feature = "openai"))]
use turngraph::llm::RotatingGenerator;

use crate::config::{Error, Provider, RunConfig};

/// Builds the generator for `config.provider`.
pub fn build_generator(config: &RunConfig) -> Result<Arc<dyn TextGenerator>, Error> {
    let generator = match config.provider {
        Provider::Mock => Arc::new(MockLlm::new()) as Arc<dyn TextGenerator>,
        Provider::Gemini => gemini_generator(config)?,
        Provider::OpenAi => openai_generator(config)?,
    };
    tracing::info!(provider = %config.provider, "text generator ready");
    Ok(generator)
}

#[cfg(feature = "gemini")]
fn gemini_generator(config: &RunConfig) -> Result<Arc<dyn TextGenerator>, Error> {
    use turngraph::llm::{build_candidates, GeminiClient};

    let mut client = GeminiClient::new(config.require_gemini_key()?);
    if let Some(base) = &config.gemini_api_base {
        client = client.with_api_base(base.as_str());
    }
    let candidates = build_candidates(
        config.gemini_model.as_deref(),
        &config.gemini_fallback_models,
    );
    tracing::debug!(candidates = ?candidates, "gemini candidate models");
    Ok(Arc::new(RotatingGenerator::new(client, candidates)))
}

#[cfg(not(feature = "gemini"))]
fn gemini_generator(_config: &RunConfig) -> Result<Arc<dyn TextGenerator>, Error> {
    Err("LLM_PROVIDER=gemini requires the `gemini` feature".into())
}

#[cfg(feature = "openai")]
fn openai_generator(config: &RunConfig) -> Result<Arc<dyn TextGenerator>, Error> {
    use async_openai::config::OpenAIConfig;
    use turngraph::llm::ChatOpenAI;

    let mut openai_config = OpenAIConfig::new().with_api_key(config.require_openai_key()?);
    if let Some(base) = &config.openai_api_base {
        openai_config = openai_config.with_api_base(base.as_str());
    }
    Ok(Arc::new(RotatingGenerator::new(
        ChatOpenAI::with_config(openai_config),
        vec![config.openai_model.clone()],
    )))
}

#[cfg(not(feature = "openai"))]
fn openai_generator(_config: &RunConfig) -> Result<Arc<dyn TextGenerator>, Error> {
    Err("LLM_PROVIDER=openai requires the `openai` feature".into())
}
