//! Agent node: one debate turn with validation-driven regeneration.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::{GenerationParams, TextGenerator};

use super::prompts::{build_agent_prompt, persona_for, AVOID_REPETITION, ENSURE_COHERENCE};
use super::validators::{normalize, validate_coherence, validate_repetition, validate_turn};
use super::{DebateState, Utterance};

const TURN_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.7,
    max_tokens: Some(64),
};
const REPETITION_RETRY_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.2,
    max_tokens: Some(64),
};
const COHERENCE_RETRY_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.6,
    max_tokens: Some(64),
};

/// Produces the next utterance for the speaker on turn.
///
/// Repetition gets one regeneration at low temperature and is fatal after that. Incoherent
/// text gets one regeneration that is accepted as is. At most three generation calls.
pub struct AgentNode {
    generator: Arc<dyn TextGenerator>,
}

impl AgentNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generates the turn text, regenerating once per failed check. Validation messages go
    /// to `notes` in the order they fired.
    async fn generate_checked(
        &self,
        state: &DebateState,
        notes: &mut Vec<String>,
    ) -> Result<String, AgentError> {
        let speaker = state.current_speaker;
        let prompt = build_agent_prompt(
            persona_for(speaker),
            &state.topic,
            state.turn_index + 1,
            state.memory_view(speaker),
        );

        let mut text = self.generator.generate(&prompt, TURN_PARAMS).await?;

        if let Err(msg) = validate_repetition(state, &text) {
            warn!(speaker = %speaker, "[AgentNode] {} -> re-asking model with adjusted temperature", msg);
            notes.push(msg);
            text = self
                .generator
                .generate(&format!("{}{}", prompt, AVOID_REPETITION), REPETITION_RETRY_PARAMS)
                .await?;
            if validate_repetition(state, &text).is_err() {
                return Err(AgentError::RepeatedArgument(text));
            }
        }

        let prev = state
            .transcript
            .last()
            .map(|u| u.text.as_str())
            .unwrap_or_default();
        if let Err(msg) = validate_coherence(prev, &text) {
            warn!(speaker = %speaker, "[AgentNode] {} -> adjusting", msg);
            notes.push(msg);
            // Accepted without another validation pass.
            text = self
                .generator
                .generate(&format!("{}{}", prompt, ENSURE_COHERENCE), COHERENCE_RETRY_PARAMS)
                .await?;
        }
        Ok(text)
    }

    async fn take_turn(
        &self,
        state: DebateState,
        ctx: Option<&RunContext<DebateState>>,
    ) -> Result<(DebateState, Next), AgentError> {
        let mut state = state;
        let speaker = state.current_speaker;
        if let Err(msg) = validate_turn(&state, speaker) {
            error!("[AgentNode] {}", msg);
            let err = AgentError::TurnViolation {
                expected: state.next_speaker().to_string(),
                got: speaker.to_string(),
            };
            return Err(err.with_diagnostics(vec![msg]));
        }

        let mut notes = Vec::new();
        let text = match self.generate_checked(&state, &mut notes).await {
            Ok(text) => text,
            Err(e) => return Err(e.with_diagnostics(notes)),
        };
        state.events.extend(notes);

        let round = state.round_number;
        info!(round, speaker = %speaker, text = %text, "[AgentNode] turn accepted");
        if let Some(ctx) = ctx {
            ctx.emit_custom(json!({
                "round": round,
                "speaker": speaker.name(),
                "text": text,
                "line": format!("[Round {}] {}: {}", round, speaker, text),
            }))
            .await;
        }

        state.used_arguments.insert(normalize(&text));
        state.transcript.push(Utterance {
            turn: state.turn_index + 1,
            speaker,
            text,
        });
        state.turn_index += 1;
        state.round_number += 1;
        state.current_speaker = state.next_speaker();
        Ok((state, Next::Continue))
    }
}

#[async_trait]
impl Node<DebateState> for AgentNode {
    fn id(&self) -> &str {
        "agent"
    }

    async fn run(&self, state: DebateState) -> Result<(DebateState, Next), AgentError> {
        self.take_turn(state, None).await
    }

    async fn run_with_context(
        &self,
        state: DebateState,
        ctx: &RunContext<DebateState>,
    ) -> Result<(DebateState, Next), AgentError> {
        self.take_turn(state, Some(ctx)).await
    }
}
