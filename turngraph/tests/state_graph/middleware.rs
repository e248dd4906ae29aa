//! StateGraph with_middleware: every node run goes through the middleware.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use turngraph::graph::NodeCall;
use turngraph::{AgentError, LoggingNodeMiddleware, Next, NodeMiddleware, StateGraph, END, START};

use crate::common::{AddNode, CounterState};

/// Records node ids in call order.
struct RecordingMiddleware {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeMiddleware<CounterState> for RecordingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: CounterState,
        inner: NodeCall<CounterState>,
    ) -> Result<(CounterState, Next), AgentError> {
        self.seen.lock().unwrap().push(node_id.to_string());
        inner(state).await
    }
}

#[tokio::test]
async fn middleware_wraps_each_node() {
    let recorder = Arc::new(RecordingMiddleware {
        seen: Mutex::new(Vec::new()),
    });
    let mut graph = StateGraph::<CounterState>::new().with_middleware(recorder.clone());
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("b", Arc::new(AddNode::new("b", 2)))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", END);
    let out = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(out.value, 3);
    assert_eq!(*recorder.seen.lock().unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn logging_middleware_does_not_change_result() {
    let mut graph =
        StateGraph::<CounterState>::new().with_middleware(Arc::new(LoggingNodeMiddleware));
    graph
        .add_node("a", Arc::new(AddNode::new("a", 7)))
        .add_edge(START, "a")
        .add_edge("a", END);
    let out = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(out.value, 7);
}
