//! Debate graph: user_input → agent → memory ─(agent | judge)→ … → judge → END.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;
use tokio::task::JoinHandle;

use crate::graph::{
    CompilationError, CompiledStateGraph, NodeMiddleware, RunFailure, StateGraph, END, START,
};
use crate::llm::TextGenerator;
use crate::stream::{StreamEvent, StreamMode};

use super::{route_after_memory, AgentNode, DebateState, JudgeNode, MemoryNode, TopicNode};

/// Builds and compiles the debate graph over one generator.
///
/// Node errors are appended to `events` before the run fails. When `middleware` is set each
/// node run is wrapped with it.
pub fn build_debate_graph(
    generator: Arc<dyn TextGenerator>,
    middleware: Option<Arc<dyn NodeMiddleware<DebateState>>>,
) -> Result<CompiledStateGraph<DebateState>, CompilationError> {
    let mut graph = StateGraph::<DebateState>::new().on_error(|state, node_id, err| {
        state.events.extend(err.diagnostics().iter().cloned());
        state.events.push(format!("[{}] error: {}", node_id, err));
    });
    if let Some(m) = middleware {
        graph = graph.with_middleware(m);
    }
    graph
        .add_node("user_input", Arc::new(TopicNode))
        .add_node("agent", Arc::new(AgentNode::new(Arc::clone(&generator))))
        .add_node("memory", Arc::new(MemoryNode::new(Arc::clone(&generator))))
        .add_node("judge", Arc::new(JudgeNode::new(generator)))
        .add_edge(START, "user_input")
        .add_edge("user_input", "agent")
        .add_edge("agent", "memory")
        .add_conditional_edges(
            "memory",
            route_after_memory,
            [("agent", "agent"), ("judge", "judge")],
        )
        .add_edge("judge", END);
    graph.compile()
}

/// Runs a full debate on `topic`.
pub async fn run_debate(
    graph: &CompiledStateGraph<DebateState>,
    topic: &str,
) -> Result<DebateState, RunFailure<DebateState>> {
    graph.invoke(DebateState::new(topic)).await
}

/// Runs a full debate on `topic`, streaming custom progress events (one per turn).
pub fn stream_debate(
    graph: &CompiledStateGraph<DebateState>,
    topic: &str,
) -> (
    ReceiverStream<StreamEvent<DebateState>>,
    JoinHandle<Result<DebateState, RunFailure<DebateState>>>,
) {
    graph.stream(DebateState::new(topic), HashSet::from([StreamMode::Custom]))
}
