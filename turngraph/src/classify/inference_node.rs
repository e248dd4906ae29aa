//! Inference node: classify the text and record prediction, confidence and logits.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::AgentError;
use crate::graph::{Next, Node};

use super::{ClassificationState, Classifier};

/// Runs the classifier on `state.text`. Never touches `route`.
pub struct InferenceNode {
    classifier: Arc<dyn Classifier>,
    max_length: usize,
}

impl InferenceNode {
    pub fn new(classifier: Arc<dyn Classifier>, max_length: usize) -> Self {
        Self {
            classifier,
            max_length,
        }
    }
}

#[async_trait]
impl Node<ClassificationState> for InferenceNode {
    fn id(&self) -> &str {
        "inference"
    }

    async fn run(
        &self,
        state: ClassificationState,
    ) -> Result<(ClassificationState, Next), AgentError> {
        let out = self.classifier.classify(&state.text, self.max_length)?;
        let event = format!(
            "[InferenceNode] Predicted label: {} | Confidence: {:.2}",
            out.label, out.confidence
        );
        info!(label = %out.label, confidence = out.confidence, "inference done");
        let mut events = state.events;
        events.push(event);
        Ok((
            ClassificationState {
                prediction: Some(out.label),
                confidence: out.confidence,
                logits: out.logits,
                events,
                ..state
            },
            Next::Continue,
        ))
    }
}
