//! `classify` subcommand: one-shot or interactive self-healing classification.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use dialoguer::{Confirm, Input};
use turngraph::classify::{
    build_classification_graph, run_classification, ClassificationState, Classifier, Confirmer,
    LexiconClassifier,
};
use turngraph::{AgentError, CompiledStateGraph};

use crate::config::{Error, RunConfig};
use crate::middleware::node_logging;

/// Asks the clarification question on the terminal.
///
/// Closed stdin or Ctrl-C surfaces as `AgentError::Interrupted`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DialoguerConfirmer;

#[async_trait]
impl Confirmer for DialoguerConfirmer {
    async fn ask_yes_no(&self, prompt: &str) -> Result<bool, AgentError> {
        let prompt = prompt
            .trim_end()
            .trim_end_matches(':')
            .trim_end_matches("[y/n]")
            .trim_end()
            .to_string();
        tokio::task::spawn_blocking(move || Confirm::new().with_prompt(prompt).interact())
            .await
            .map_err(|e| AgentError::Interrupted(e.to_string()))?
            .map_err(|e| AgentError::Interrupted(e.to_string()))
    }
}

/// Classifier from `MODEL_DIR` (`lexicon.json`), or the built-in lexicon when unset.
pub fn load_classifier(config: &RunConfig) -> Result<Arc<dyn Classifier>, Error> {
    let classifier = match &config.model_dir {
        Some(dir) => LexiconClassifier::from_dir(dir)?,
        None => LexiconClassifier::builtin(),
    };
    Ok(Arc::new(classifier))
}

/// Builds the classification graph with the configured knobs and collaborators.
pub fn classification_graph(
    config: &RunConfig,
    classifier: Arc<dyn Classifier>,
    confirmer: Arc<dyn Confirmer>,
) -> Result<CompiledStateGraph<ClassificationState>, Error> {
    Ok(build_classification_graph(
        &config.classify_config(),
        classifier,
        confirmer,
        node_logging(config.verbose),
    )?)
}

/// Classifies one text and logs one structured line for the run.
///
/// On failure the recorded events are written to `out` before the error is returned.
pub async fn classify_one(
    graph: &CompiledStateGraph<ClassificationState>,
    text: &str,
    out: &mut impl Write,
) -> Result<ClassificationState, Error> {
    match run_classification(graph, text).await {
        Ok(state) => {
            tracing::info!(
                prediction = ?state.prediction,
                confidence = state.confidence,
                route = ?state.route,
                corrected = state.corrected,
                correction_source = ?state.correction_source,
                "classification finished"
            );
            Ok(state)
        }
        Err(failure) => {
            for event in &failure.state.events {
                writeln!(out, "  - {}", event)?;
            }
            tracing::error!(node = %failure.node_id, error = %failure.error, "classification failed");
            Err(failure.into())
        }
    }
}

/// Renders a finished classification as text or pretty JSON.
pub fn render_classification(state: &ClassificationState, json: bool) -> Result<String, Error> {
    if json {
        return Ok(serde_json::to_string_pretty(state)?);
    }
    let mut s = String::new();
    let label = state
        .prediction
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());
    s.push_str(&format!("Prediction: {}\n", label));
    s.push_str(&format!("Confidence: {:.2}\n", state.confidence));
    s.push_str(&format!("Corrected: {}\n", state.corrected));
    s.push_str(&format!(
        "Correction source: {}\n",
        state.correction_source.as_deref().unwrap_or("-")
    ));
    s.push_str("Events:\n");
    for event in &state.events {
        s.push_str(&format!("  - {}\n", event));
    }
    Ok(s)
}

async fn read_text() -> Result<String, Error> {
    let line = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("Enter text to classify (blank line quits)")
            .allow_empty(true)
            .interact_text()
    })
    .await??;
    Ok(line.trim().to_string())
}

/// Runs the `classify` subcommand: `text` once, or an input loop until a blank line.
pub async fn classify_command(config: &RunConfig, text: Option<String>) -> Result<(), Error> {
    let graph = classification_graph(
        config,
        load_classifier(config)?,
        Arc::new(DialoguerConfirmer),
    )?;
    let mut stdout = std::io::stdout();

    if let Some(text) = text {
        let state = classify_one(&graph, &text, &mut stdout).await?;
        print!("{}", render_classification(&state, config.json)?);
        return Ok(());
    }

    loop {
        let text = read_text().await?;
        if text.is_empty() {
            break;
        }
        let state = classify_one(&graph, &text, &mut stdout).await?;
        println!("{}", render_classification(&state, config.json)?);
    }
    Ok(())
}
