//! Classification graph: inference → confidence check → (END | fallback → END).

use std::sync::Arc;

use crate::graph::{
    CompilationError, CompiledStateGraph, NodeMiddleware, RunFailure, StateGraph, END, START,
};

use super::{
    route_after_confidence, ClassificationState, Classifier, ConfidenceCheckNode, Confirmer,
    FallbackNode, InferenceNode,
};

/// Default confidence threshold below which the user is asked.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.60;
/// Default token cap for the classifier.
pub const DEFAULT_MAX_LENGTH: usize = 256;
/// Default clarification question.
pub const DEFAULT_CONFIRMATION_PROMPT: &str =
    "Could you clarify your intent? Was this a negative review? [y/n]: ";

/// Knobs of the classification pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifyConfig {
    pub confidence_threshold: f32,
    pub max_length: usize,
    pub confirmation_prompt: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
            confirmation_prompt: DEFAULT_CONFIRMATION_PROMPT.to_string(),
        }
    }
}

/// Builds and compiles the classification graph.
///
/// Node errors are appended to `events` before the run fails. When `middleware` is set each
/// node run is wrapped with it (e.g. enter/exit logging).
pub fn build_classification_graph(
    config: &ClassifyConfig,
    classifier: Arc<dyn Classifier>,
    confirmer: Arc<dyn Confirmer>,
    middleware: Option<Arc<dyn NodeMiddleware<ClassificationState>>>,
) -> Result<CompiledStateGraph<ClassificationState>, CompilationError> {
    let mut graph = StateGraph::<ClassificationState>::new().on_error(|state, node_id, err| {
        state.events.extend(err.diagnostics().iter().cloned());
        state.events.push(format!("[{}] error: {}", node_id, err));
    });
    if let Some(m) = middleware {
        graph = graph.with_middleware(m);
    }
    graph
        .add_node(
            "inference",
            Arc::new(InferenceNode::new(classifier, config.max_length)),
        )
        .add_node(
            "confidence_check",
            Arc::new(ConfidenceCheckNode::new(config.confidence_threshold)),
        )
        .add_node(
            "fallback",
            Arc::new(FallbackNode::new(
                confirmer,
                config.confirmation_prompt.clone(),
            )),
        )
        .add_edge(START, "inference")
        .add_edge("inference", "confidence_check")
        .add_conditional_edges(
            "confidence_check",
            route_after_confidence,
            [("accept", END), ("fallback", "fallback")],
        )
        .add_edge("fallback", END);
    graph.compile()
}

/// Runs one text through the compiled graph.
pub async fn run_classification(
    graph: &CompiledStateGraph<ClassificationState>,
    text: &str,
) -> Result<ClassificationState, RunFailure<ClassificationState>> {
    graph.invoke(ClassificationState::new(text)).await
}
