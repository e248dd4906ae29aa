//! `debate` subcommand: stream the Scientist/Philosopher debate, then print the verdict.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use dialoguer::Input;
use serde_json::json;
use tokio_stream::StreamExt;
use turngraph::debate::{build_debate_graph, stream_debate, DebateState};
use turngraph::llm::TextGenerator;
use turngraph::StreamEvent;

use crate::config::{Error, RunConfig};
use crate::middleware::node_logging;

use super::build_generator;

/// Topic offered when neither `--topic` nor `DEBATE_TOPIC` is set.
pub const DEFAULT_TOPIC: &str = "Should AI be regulated like medicine?";

/// Topic from config, otherwise asked on the terminal with [`DEFAULT_TOPIC`] prefilled.
pub async fn resolve_topic(config: &RunConfig) -> Result<String, Error> {
    if let Some(topic) = &config.debate_topic {
        return Ok(topic.clone());
    }
    let topic = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("Enter topic for debate")
            .default(DEFAULT_TOPIC.to_string())
            .interact_text()
    })
    .await??;
    let topic = topic.trim();
    Ok(if topic.is_empty() {
        DEFAULT_TOPIC.to_string()
    } else {
        topic.to_string()
    })
}

/// Runs one debate over `generator`, writing a progress line per turn to `out`.
///
/// When `progress` is false nothing is written for successful turns. On failure the
/// recorded events are written before the error is returned. A failed progress write
/// cancels the running debate.
pub async fn debate_with_generator(
    generator: Arc<dyn TextGenerator>,
    topic: &str,
    verbose: bool,
    progress: bool,
    out: &mut impl Write,
) -> Result<DebateState, Error> {
    let graph = build_debate_graph(generator, node_logging(verbose))?;
    tracing::info!(topic = %topic, "debate starting");
    let (mut events, handle) = stream_debate(&graph, topic);
    while let Some(event) = events.next().await {
        let StreamEvent::Custom(payload) = event else {
            continue;
        };
        if let Some(line) = payload["line"].as_str().filter(|_| progress) {
            if let Err(e) = writeln!(out, "{}", line) {
                handle.abort();
                return Err(e.into());
            }
        }
    }
    match handle.await? {
        Ok(state) => {
            tracing::info!(
                winner = ?state.final_winner,
                turns = state.transcript.len(),
                "debate finished"
            );
            Ok(state)
        }
        Err(failure) => {
            for event in &failure.state.events {
                writeln!(out, "  - {}", event)?;
            }
            tracing::error!(node = %failure.node_id, error = %failure.error, "debate failed");
            Err(failure.into())
        }
    }
}

/// Renders the judge's verdict as text or pretty JSON.
pub fn render_verdict(state: &DebateState, json: bool, log_path: &Path) -> Result<String, Error> {
    let winner = state
        .final_winner
        .map(|w| w.to_string())
        .unwrap_or_else(|| "-".to_string());
    let summary = state.final_summary.as_deref().unwrap_or_default();
    let reason = state.final_reason.as_deref().unwrap_or_default();
    if json {
        return Ok(serde_json::to_string_pretty(&json!({
            "topic": state.topic,
            "transcript": state.transcript,
            "events": state.events,
            "summary": summary,
            "winner": winner,
            "reason": reason,
            "log_file": log_path.display().to_string(),
        }))?);
    }
    Ok(format!(
        "\n[Judge] Summary of debate:\n{}\n\n[Judge] Winner: {}\nReason: {}\n\nLog file: {}\n",
        summary,
        winner,
        reason,
        log_path.display()
    ))
}

/// Runs the `debate` subcommand.
pub async fn debate_command(config: &RunConfig, log_path: &Path) -> Result<(), Error> {
    let generator = build_generator(config)?;
    let topic = resolve_topic(config).await?;
    let mut stdout = std::io::stdout();
    if !config.json {
        writeln!(stdout, "Starting debate between Scientist and Philosopher...")?;
    }
    let state =
        debate_with_generator(generator, &topic, config.verbose, !config.json, &mut stdout).await?;
    print!("{}", render_verdict(&state, config.json, log_path)?);
    Ok(())
}
