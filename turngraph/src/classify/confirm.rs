//! Yes/no confirmation collaborator for the fallback node.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;

/// Asks the user a yes/no question.
///
/// Implementations return `AgentError::Interrupted` when no answer can be obtained
/// (closed terminal, Ctrl-C); the run then fails.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn ask_yes_no(&self, prompt: &str) -> Result<bool, AgentError>;
}

/// Confirmer that answers from a fixed queue and records the prompts it was shown.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts asked so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn ask_yes_no(&self, prompt: &str) -> Result<bool, AgentError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        self.answers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .ok_or_else(|| AgentError::Interrupted("no scripted answer left".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_in_order_then_interrupts() {
        let c = ScriptedConfirmer::new([true, false]);
        assert!(c.ask_yes_no("q1").await.unwrap());
        assert!(!c.ask_yes_no("q2").await.unwrap());
        let err = c.ask_yes_no("q3").await.unwrap_err();
        assert!(matches!(err, AgentError::Interrupted(_)));
        assert_eq!(c.prompts(), vec!["q1", "q2", "q3"]);
    }
}
