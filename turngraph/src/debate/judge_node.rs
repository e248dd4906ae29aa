//! Judge node: one verdict call, parsed with a parity fallback.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{GenerationParams, TextGenerator};

use super::prompts::build_judge_prompt;
use super::{DebateState, Speaker};

const JUDGE_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.2,
    max_tokens: Some(128),
};

/// Parsed judge output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub summary: String,
    pub winner: Option<Speaker>,
    pub reason: String,
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label)
        .then(|| line[label.len()..].trim())
}

/// Parses `Summary:` / `Winner:` / `Reason:` lines, labels matched case-insensitively. The
/// winner must be an exact participant name; anything else leaves it `None`. Later lines
/// override earlier ones.
pub fn parse_verdict(text: &str) -> Verdict {
    let mut verdict = Verdict::default();
    for line in text.lines() {
        if let Some(v) = strip_label(line, "summary:") {
            verdict.summary = v.to_string();
        } else if let Some(v) = strip_label(line, "winner:") {
            if let Some(s) = Speaker::from_name(v) {
                verdict.winner = Some(s);
            }
        } else if let Some(v) = strip_label(line, "reason:") {
            verdict.reason = v.to_string();
        }
    }
    verdict
}

/// Winner used when the verdict names none: Scientist for an odd transcript length,
/// Philosopher for an even one.
pub fn parity_winner(transcript_len: usize) -> Speaker {
    if transcript_len % 2 == 1 {
        Speaker::Scientist
    } else {
        Speaker::Philosopher
    }
}

/// Scores the debate. Terminal.
pub struct JudgeNode {
    generator: Arc<dyn TextGenerator>,
}

impl JudgeNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node<DebateState> for JudgeNode {
    fn id(&self) -> &str {
        "judge"
    }

    async fn run(&self, state: DebateState) -> Result<(DebateState, Next), AgentError> {
        let mut state = state;
        let prompt = build_judge_prompt(&state.topic, &state.memory_summary, &state.transcript_text());
        let judgment = self.generator.generate(&prompt, JUDGE_PARAMS).await?;
        let verdict = parse_verdict(&judgment);
        let winner = match verdict.winner {
            Some(w) => w,
            None => {
                let w = parity_winner(state.transcript.len());
                warn!(fallback = %w, "[Judge] no valid winner in verdict, using parity fallback");
                state
                    .events
                    .push(format!("[Judge] No valid winner; parity fallback chose {}", w));
                w
            }
        };
        info!("[Judge] Summary: {}", verdict.summary);
        info!("[Judge] Winner: {}", winner);
        info!("[Judge] Reason: {}", verdict.reason);
        state.final_summary = Some(verdict.summary);
        state.final_winner = Some(winner);
        state.final_reason = Some(verdict.reason);
        Ok((state, Next::End))
    }
}
