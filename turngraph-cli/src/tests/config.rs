//! Unit tests for [`RunConfig`](crate::config::RunConfig) and [`RunOptions`](crate::config::RunOptions).
//!
//! Scenarios: from_env defaults, provider selection, threshold validation, option overrides.
//! Tests that touch the environment hold a static lock so they do not run in parallel and
//! overwrite each other's variables.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::{Provider, RunConfig, RunOptions};

/// Every variable `RunConfig::from_env` reads.
const CONFIG_VARS: &[&str] = &[
    "LLM_PROVIDER",
    "USE_MOCK_LLM",
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "GEMINI_FALLBACK_MODELS",
    "GEMINI_API_BASE",
    "OPENAI_API_KEY",
    "OPENAI_API_BASE",
    "OPENAI_MODEL",
    "CONFIDENCE_THRESHOLD",
    "MAX_LENGTH",
    "MODEL_DIR",
    "LOG_DIR",
    "ARTIFACTS_DIR",
    "DEBATE_TOPIC",
];

static ENV_LOCK: std::sync::OnceLock<Mutex<()>> = std::sync::OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs `f` with only `vars` set among [`CONFIG_VARS`], then restores the previous values.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let _guard = env_lock();
    let saved: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|k| (*k, std::env::var(k).ok()))
        .collect();
    for k in CONFIG_VARS {
        std::env::remove_var(k);
    }
    for (k, v) in vars {
        std::env::set_var(k, v);
    }

    let result = f();

    for (k, v) in saved {
        match v {
            Some(v) => std::env::set_var(k, v),
            None => std::env::remove_var(k),
        }
    }
    result
}

/// **Scenario**: With nothing set, from_env returns the documented defaults.
///
/// Given: none of the config variables are set
/// When: RunConfig::from_env() is called
/// Then: provider is gemini, threshold 0.60, max length 256, dirs are logs/ and artifacts/
#[test]
fn from_env_uses_defaults_when_unset() {
    let config = with_env(&[], RunConfig::from_env).unwrap();
    assert_eq!(config.provider, Provider::Gemini);
    assert!((config.confidence_threshold - 0.60).abs() < f32::EPSILON);
    assert_eq!(config.max_length, 256);
    assert_eq!(config.log_dir, PathBuf::from("logs"));
    assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
    assert_eq!(config.openai_model, "gpt-4o-mini");
    assert!(config.gemini_api_key.is_none());
    assert!(config.model_dir.is_none());
    assert!(config.debate_topic.is_none());
}

/// **Scenario**: A missing Gemini key does not fail config loading; it fails when required.
#[test]
fn gemini_key_is_checked_lazily() {
    let config = with_env(&[], RunConfig::from_env).unwrap();
    let err = config.require_gemini_key().unwrap_err().to_string();
    assert!(err.contains("GEMINI_API_KEY"), "{}", err);
}

/// **Scenario**: USE_MOCK_LLM=1 wins over LLM_PROVIDER.
#[test]
fn use_mock_llm_forces_mock_provider() {
    let config = with_env(
        &[("LLM_PROVIDER", "openai"), ("USE_MOCK_LLM", "1")],
        RunConfig::from_env,
    )
    .unwrap();
    assert_eq!(config.provider, Provider::Mock);
}

/// **Scenario**: LLM_PROVIDER is case-insensitive; unknown values are rejected.
#[test]
fn llm_provider_is_parsed() {
    let config = with_env(&[("LLM_PROVIDER", "OpenAI")], RunConfig::from_env).unwrap();
    assert_eq!(config.provider, Provider::OpenAi);

    let err = with_env(&[("LLM_PROVIDER", "claude")], RunConfig::from_env)
        .unwrap_err()
        .to_string();
    assert!(err.contains("LLM_PROVIDER"), "{}", err);
}

/// **Scenario**: CONFIDENCE_THRESHOLD must be a number strictly between 0 and 1.
///
/// Given: CONFIDENCE_THRESHOLD set to 1.5, 0, or a non-number
/// When: RunConfig::from_env() is called
/// Then: each is an error; 0.75 is accepted
#[test]
fn confidence_threshold_outside_unit_interval_is_rejected() {
    for bad in ["1.5", "0", "1", "abc"] {
        let result = with_env(&[("CONFIDENCE_THRESHOLD", bad)], RunConfig::from_env);
        let err = result.expect_err(bad).to_string();
        assert!(err.contains("CONFIDENCE_THRESHOLD"), "{}: {}", bad, err);
    }
    let config = with_env(&[("CONFIDENCE_THRESHOLD", "0.75")], RunConfig::from_env).unwrap();
    assert!((config.confidence_threshold - 0.75).abs() < f32::EPSILON);
}

#[test]
fn max_length_must_be_positive() {
    assert!(with_env(&[("MAX_LENGTH", "0")], RunConfig::from_env).is_err());
    let config = with_env(&[("MAX_LENGTH", "64")], RunConfig::from_env).unwrap();
    assert_eq!(config.max_length, 64);
}

/// **Scenario**: Gemini settings and directories are read; the fallback list is split on commas.
#[test]
fn gemini_and_directory_settings_are_read() {
    let config = with_env(
        &[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "models/gemini-2.5-pro"),
            ("GEMINI_FALLBACK_MODELS", " gemini-2.0-flash, ,gemini-1.5-flash "),
            ("MODEL_DIR", "model"),
            ("LOG_DIR", "out/logs"),
            ("ARTIFACTS_DIR", "out/artifacts"),
            ("DEBATE_TOPIC", "Is math discovered?"),
        ],
        RunConfig::from_env,
    )
    .unwrap();
    assert_eq!(config.require_gemini_key().unwrap(), "k");
    assert_eq!(config.gemini_model.as_deref(), Some("models/gemini-2.5-pro"));
    assert_eq!(
        config.gemini_fallback_models,
        vec!["gemini-2.0-flash".to_string(), "gemini-1.5-flash".to_string()]
    );
    assert_eq!(config.model_dir, Some(PathBuf::from("model")));
    assert_eq!(config.log_dir, PathBuf::from("out/logs"));
    assert_eq!(config.artifacts_dir, PathBuf::from("out/artifacts"));
    assert_eq!(config.debate_topic.as_deref(), Some("Is math discovered?"));
}

/// **Scenario**: apply_options overrides only the set fields and validates the threshold.
///
/// Given: a default config
/// When: options with threshold, topic, json and verbose are applied
/// Then: those fields change; an out-of-range threshold is an error and leaves the old value
#[test]
fn apply_options_overrides_set_fields() {
    let mut config = RunConfig {
        debate_topic: Some("from env".into()),
        ..RunConfig::default()
    };
    config
        .apply_options(&RunOptions {
            threshold: Some(0.8),
            topic: Some("  from flag  ".into()),
            json: true,
            verbose: true,
        })
        .unwrap();
    assert!((config.confidence_threshold - 0.8).abs() < f32::EPSILON);
    assert_eq!(config.debate_topic.as_deref(), Some("from flag"));
    assert!(config.json);
    assert!(config.verbose);

    let err = config
        .apply_options(&RunOptions {
            threshold: Some(0.0),
            ..RunOptions::default()
        })
        .unwrap_err();
    assert!(err.to_string().contains("CONFIDENCE_THRESHOLD"), "{}", err);
    assert!((config.confidence_threshold - 0.8).abs() < f32::EPSILON);
}

#[test]
fn blank_topic_option_keeps_configured_topic() {
    let mut config = RunConfig {
        debate_topic: Some("from env".into()),
        ..RunConfig::default()
    };
    config
        .apply_options(&RunOptions {
            topic: Some("   ".into()),
            ..RunOptions::default()
        })
        .unwrap();
    assert_eq!(config.debate_topic.as_deref(), Some("from env"));
}

#[test]
fn classify_config_carries_threshold_and_max_length() {
    let config = RunConfig {
        confidence_threshold: 0.9,
        max_length: 32,
        ..RunConfig::default()
    };
    let knobs = config.classify_config();
    assert!((knobs.confidence_threshold - 0.9).abs() < f32::EPSILON);
    assert_eq!(knobs.max_length, 32);
}
