//! Confidence check: accept the prediction or route to user clarification.

use async_trait::async_trait;
use tracing::info;

use crate::error::AgentError;
use crate::graph::{Next, Node};

use super::{ClassificationState, Route};

/// Sets `route` to `Accept` iff `confidence >= threshold`, else `Fallback`.
pub struct ConfidenceCheckNode {
    threshold: f32,
}

impl ConfidenceCheckNode {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

/// Router after the confidence check: the branch key of `state.route`. A state that was never
/// checked is accepted.
pub fn route_after_confidence(state: &ClassificationState) -> String {
    state.route.unwrap_or(Route::Accept).as_str().to_string()
}

#[async_trait]
impl Node<ClassificationState> for ConfidenceCheckNode {
    fn id(&self) -> &str {
        "confidence_check"
    }

    async fn run(
        &self,
        state: ClassificationState,
    ) -> Result<(ClassificationState, Next), AgentError> {
        let c = state.confidence;
        let (route, event) = if c >= self.threshold {
            (
                Route::Accept,
                format!(
                    "[ConfidenceCheckNode] Confidence {:.2} >= {:.2}. Accepting.",
                    c, self.threshold
                ),
            )
        } else {
            (
                Route::Fallback,
                format!(
                    "[ConfidenceCheckNode] Confidence {:.2} < {:.2}. Triggering fallback...",
                    c, self.threshold
                ),
            )
        };
        info!(confidence = c, threshold = self.threshold, route = route.as_str(), "confidence checked");
        let mut events = state.events;
        events.push(event);
        Ok((
            ClassificationState {
                route: Some(route),
                events,
                ..state
            },
            Next::Continue,
        ))
    }
}
