//! Run config: provider selection, model keys, classification knobs, output directories.
//!
//! Filled from env / .env by [`RunConfig::from_env`]; consumed by the subcommands in
//! [`run`](crate::run).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use turngraph::classify::{ClassifyConfig, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_LENGTH};

/// Error type used for config loading and CLI runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Model used when `OPENAI_MODEL` is unset.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Which text generator drives the debate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    /// Gemini REST API with model rotation; needs `GEMINI_API_KEY`.
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions; needs `OPENAI_API_KEY`.
    OpenAi,
    /// Offline canned responses.
    Mock,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Mock => "mock",
        })
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            other => Err(format!(
                "unknown LLM_PROVIDER '{}' (expected gemini, openai or mock)",
                other
            )),
        }
    }
}

/// Run config for the `classify`, `debate` and `draw` subcommands.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Debate generator provider.
    pub provider: Provider,
    /// Gemini API key. Checked only when the Gemini generator is built.
    pub gemini_api_key: Option<String>,
    /// Preferred Gemini model, tried before the built-in list.
    pub gemini_model: Option<String>,
    /// Replaces the built-in Gemini candidate list when non-empty.
    pub gemini_fallback_models: Vec<String>,
    /// Gemini REST base override.
    pub gemini_api_base: Option<String>,
    /// OpenAI API key.
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL override.
    pub openai_api_base: Option<String>,
    /// OpenAI model name.
    pub openai_model: String,
    /// Classifier confidence threshold, in (0, 1).
    pub confidence_threshold: f32,
    /// Token cap for the classifier.
    pub max_length: usize,
    /// Directory with `lexicon.json`; `None` uses the built-in lexicon.
    pub model_dir: Option<PathBuf>,
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Directory for DOT topology files.
    pub artifacts_dir: PathBuf,
    /// Debate topic; when unset the CLI asks for one.
    pub debate_topic: Option<String>,
    /// Print results as JSON.
    pub json: bool,
    /// Attach node logging middleware.
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            gemini_api_key: None,
            gemini_model: None,
            gemini_fallback_models: Vec::new(),
            gemini_api_base: None,
            openai_api_key: None,
            openai_api_base: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
            model_dir: None,
            log_dir: PathBuf::from("logs"),
            artifacts_dir: PathBuf::from("artifacts"),
            debate_topic: None,
            json: false,
            verbose: false,
        }
    }
}

fn invalid_input(msg: String) -> Error {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidInput, msg))
}

/// Non-empty, trimmed env var.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(key: &str) -> bool {
    env_opt(key).is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

fn check_threshold(threshold: f32) -> Result<f32, Error> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(threshold)
    } else {
        Err(invalid_input(format!(
            "CONFIDENCE_THRESHOLD must be between 0 and 1 (exclusive), got {}",
            threshold
        )))
    }
}

impl RunConfig {
    /// Fill config from env vars (and .env). Call `dotenv::dotenv().ok()` first.
    ///
    /// `LLM_PROVIDER` (gemini|openai|mock, default gemini); `USE_MOCK_LLM=1` forces mock.
    /// Gemini: `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_FALLBACK_MODELS` (comma list),
    /// `GEMINI_API_BASE`. OpenAI: `OPENAI_API_KEY`, `OPENAI_API_BASE`, `OPENAI_MODEL`.
    /// Classification: `CONFIDENCE_THRESHOLD`, `MAX_LENGTH`, `MODEL_DIR`.
    /// Output: `LOG_DIR`, `ARTIFACTS_DIR`. Debate: `DEBATE_TOPIC`.
    pub fn from_env() -> Result<Self, Error> {
        let mut provider = match env_opt("LLM_PROVIDER") {
            Some(p) => p.parse::<Provider>().map_err(invalid_input)?,
            None => Provider::default(),
        };
        if env_flag("USE_MOCK_LLM") {
            provider = Provider::Mock;
        }
        let confidence_threshold = match env_opt("CONFIDENCE_THRESHOLD") {
            Some(raw) => check_threshold(raw.parse().map_err(|_| {
                invalid_input(format!("CONFIDENCE_THRESHOLD is not a number: {}", raw))
            })?)?,
            None => DEFAULT_CONFIDENCE_THRESHOLD,
        };
        let max_length = match env_opt("MAX_LENGTH") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    invalid_input(format!("MAX_LENGTH must be a positive integer: {}", raw))
                })?,
            None => DEFAULT_MAX_LENGTH,
        };
        let gemini_fallback_models = env_opt("GEMINI_FALLBACK_MODELS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            provider,
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_model: env_opt("GEMINI_MODEL"),
            gemini_fallback_models,
            gemini_api_base: env_opt("GEMINI_API_BASE"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_api_base: env_opt("OPENAI_API_BASE"),
            openai_model: env_opt("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            confidence_threshold,
            max_length,
            model_dir: env_opt("MODEL_DIR").map(PathBuf::from),
            log_dir: env_opt("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            artifacts_dir: env_opt("ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("artifacts")),
            debate_topic: env_opt("DEBATE_TOPIC"),
            json: false,
            verbose: false,
        })
    }

    /// Apply overrides from `RunOptions`. Only set fields override; the threshold is
    /// validated again.
    pub fn apply_options(&mut self, options: &super::RunOptions) -> Result<(), Error> {
        if let Some(t) = options.threshold {
            self.confidence_threshold = check_threshold(t)?;
        }
        if let Some(topic) = options.topic.as_deref().map(str::trim) {
            if !topic.is_empty() {
                self.debate_topic = Some(topic.to_string());
            }
        }
        if options.json {
            self.json = true;
        }
        self.verbose = options.verbose;
        Ok(())
    }

    /// Classification pipeline knobs.
    pub fn classify_config(&self) -> ClassifyConfig {
        ClassifyConfig {
            confidence_threshold: self.confidence_threshold,
            max_length: self.max_length,
            ..ClassifyConfig::default()
        }
    }

    /// Gemini key or an error naming the variable; checked before any node runs.
    pub fn require_gemini_key(&self) -> Result<&str, Error> {
        self.gemini_api_key.as_deref().ok_or_else(|| {
            invalid_input(
                "GEMINI_API_KEY is not set; configure it in .env or set USE_MOCK_LLM=1".to_string(),
            )
        })
    }

    /// OpenAI key or an error naming the variable.
    pub fn require_openai_key(&self) -> Result<&str, Error> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            invalid_input(
                "OPENAI_API_KEY is not set; configure it in .env or set USE_MOCK_LLM=1".to_string(),
            )
        })
    }
}
