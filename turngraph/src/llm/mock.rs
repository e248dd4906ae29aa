//! Mock text generator for tests and offline runs.
//!
//! Answers from a script first; once the script is empty, falls back to canned demo output
//! chosen by prompt markers (judge verdict, transcript summary, memory bullets) or a
//! numbered argument. Every call is recorded.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationError, GenerationParams, TextGenerator};

/// Prompt marker of the judge prompt.
pub const JUDGE_FORMAT_MARKER: &str = "Output format (strict):";
/// Prompt marker of the transcript summary prompt.
pub const SUMMARY_MARKER: &str = "Summarize the debate transcript";
/// Prompt marker of the per-speaker memory prompt.
pub const MEMORY_ROUTE_MARKER: &str = "Extract opponent's last";

/// One recorded call.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateCall {
    pub prompt: String,
    pub params: GenerationParams,
}

/// Mock generator: scripted replies, then canned ones.
///
/// The argument counter advances on every call, so canned arguments never repeat.
#[derive(Debug, Default)]
pub struct MockLlm {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<GenerateCall>>,
}

impl MockLlm {
    /// Canned replies only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies `responses` in order, then canned replies.
    pub fn with_responses<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_script(responses.into_iter().map(|r| Ok(r.into())))
    }

    /// Replies (or fails) from `script` in order, then canned replies.
    pub fn with_script(script: impl IntoIterator<Item = Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends one scripted reply.
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock_script().push_back(Ok(response.into()));
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, GenerationError>>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn canned(prompt: &str, n: usize) -> String {
        if prompt.contains(JUDGE_FORMAT_MARKER) {
            "Summary: A balanced debate occurred.\nWinner: Scientist\nReason: More concrete risk-based points.".to_string()
        } else if prompt.contains(SUMMARY_MARKER) {
            "Summary of debate so far: key points listed succinctly.".to_string()
        } else if prompt.contains(MEMORY_ROUTE_MARKER) {
            "- Opponent noted concerns or freedoms.\n- Address trade-offs.".to_string()
        } else {
            format!(
                "Argument #{}: A new, non-repetitive point relevant to the topic.",
                n
            )
        }
    }
}

#[async_trait]
impl TextGenerator for MockLlm {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let n = {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            calls.push(GenerateCall {
                prompt: prompt.to_string(),
                params,
            });
            calls.len()
        };
        match self.lock_script().pop_front() {
            Some(reply) => reply,
            None => Ok(Self::canned(prompt, n)),
        }
    }
}
