//! Fallback node: ask the user whether the text was negative and correct the label.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::AgentError;
use crate::graph::{Next, Node};

use super::{ClassificationState, Confirmer, Sentiment};

/// Correction source recorded when the user's answer changed the label.
pub const USER_CLARIFICATION: &str = "user_clarification";

/// Asks the confirmer "was this negative?" and applies the answer.
///
/// Yes and prediction not negative: relabel negative. No and prediction not positive: relabel
/// positive. Both set `corrected` and the correction source; otherwise `corrected` is false
/// and the source cleared. Terminal.
pub struct FallbackNode {
    confirmer: Arc<dyn Confirmer>,
    prompt: String,
}

impl FallbackNode {
    pub fn new(confirmer: Arc<dyn Confirmer>, prompt: impl Into<String>) -> Self {
        Self {
            confirmer,
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl Node<ClassificationState> for FallbackNode {
    fn id(&self) -> &str {
        "fallback"
    }

    async fn run(
        &self,
        state: ClassificationState,
    ) -> Result<(ClassificationState, Next), AgentError> {
        let is_negative = self.confirmer.ask_yes_no(&self.prompt).await?;
        let corrected_to = match (is_negative, state.prediction) {
            (true, p) if p != Some(Sentiment::Negative) => Some(Sentiment::Negative),
            (false, p) if p != Some(Sentiment::Positive) => Some(Sentiment::Positive),
            _ => None,
        };
        info!(answer = is_negative, corrected = corrected_to.is_some(), "user clarification");

        let mut events = state.events;
        events.push(
            "[FallbackNode] User clarification handled; state updated accordingly.".to_string(),
        );
        let next_state = match corrected_to {
            Some(label) => ClassificationState {
                prediction: Some(label),
                corrected: true,
                correction_source: Some(USER_CLARIFICATION.to_string()),
                events,
                ..state
            },
            None => ClassificationState {
                corrected: false,
                correction_source: None,
                events,
                ..state
            },
        };
        Ok((next_state, Next::End))
    }
}
