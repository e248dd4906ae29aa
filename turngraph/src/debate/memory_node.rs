//! Memory node: rewrites the global summary and each speaker's view of the opponent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{GenerationParams, TextGenerator};

use super::prompts::{build_memory_route_prompt, build_summary_prompt};
use super::{DebateState, Speaker, MAX_ROUNDS};

const SUMMARY_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.4,
    max_tokens: Some(160),
};
const ROUTED_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.2,
    max_tokens: Some(96),
};

/// Router after the memory node: `judge` once the transcript holds [`MAX_ROUNDS`] entries,
/// `agent` before that.
pub fn route_after_memory(state: &DebateState) -> String {
    if state.transcript.len() >= MAX_ROUNDS {
        "judge".to_string()
    } else {
        "agent".to_string()
    }
}

/// One summary call plus one routed-memory call per speaker. Output is taken as is.
pub struct MemoryNode {
    generator: Arc<dyn TextGenerator>,
}

impl MemoryNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node<DebateState> for MemoryNode {
    fn id(&self) -> &str {
        "memory"
    }

    async fn run(&self, state: DebateState) -> Result<(DebateState, Next), AgentError> {
        let mut state = state;
        let summary = self
            .generator
            .generate(&build_summary_prompt(&state.transcript_text()), SUMMARY_PARAMS)
            .await?;

        let mut agent_memory = state.agent_memory.clone();
        for speaker in Speaker::ALL {
            let routed = self
                .generator
                .generate(&build_memory_route_prompt(&state, speaker), ROUTED_PARAMS)
                .await?;
            agent_memory.insert(speaker, routed);
        }

        info!(summary_len = summary.len(), "[MemoryNode] memory updated");
        info!("[MemoryNode] Summary: {}", summary);
        for (speaker, view) in &agent_memory {
            info!("[MemoryNode] {} view: {}", speaker, view);
        }
        state.memory_summary = summary;
        state.agent_memory = agent_memory;
        Ok((state, Next::Continue))
    }
}
