//! StateGraph invoke: linear chains, conditional loops, failures with partial state.

use std::sync::Arc;

use turngraph::{AgentError, StateGraph, END, START};

use crate::common::{AddNode, CounterState, FailNode};

#[tokio::test]
async fn invoke_runs_linear_chain_in_order() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("b", Arc::new(AddNode::new("b", 10)))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", END);
    let out = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(out.value, 11);
    assert_eq!(out.visited, vec!["a", "b"]);
}

/// **Scenario**: Router loops until its condition flips, then exits through END.
#[tokio::test]
async fn conditional_edge_loops_until_router_exits() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("inc", Arc::new(AddNode::new("inc", 1)))
        .add_node("done", Arc::new(AddNode::new("done", 100)))
        .add_edge(START, "inc")
        .add_conditional_edges(
            "inc",
            |s: &CounterState| (if s.value >= 3 { "stop" } else { "again" }).to_string(),
            [("again", "inc"), ("stop", "done")],
        )
        .add_edge("done", END);
    let out = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(out.value, 103);
    assert_eq!(out.visited, vec!["inc", "inc", "inc", "done"]);
}

/// **Scenario**: A failing node surfaces its error with the last committed state, and the
/// error recorder writes the diagnostic into that state.
#[tokio::test]
async fn failure_keeps_partial_state_and_records_error() {
    let mut graph = StateGraph::<CounterState>::new().on_error(|s, node_id, err| {
        s.errors.push(format!("{}: {}", node_id, err));
    });
    graph
        .add_node("a", Arc::new(AddNode::new("a", 5)))
        .add_node("fail", Arc::new(FailNode))
        .add_edge(START, "a")
        .add_edge("a", "fail")
        .add_edge("fail", END);
    let failure = graph
        .compile()
        .unwrap()
        .invoke(CounterState::default())
        .await
        .unwrap_err();
    assert_eq!(failure.node_id, "fail");
    assert_eq!(failure.state.value, 5);
    assert_eq!(failure.state.errors, vec!["fail: execution failed: boom"]);
    assert!(matches!(failure.into_error(), AgentError::ExecutionFailed(_)));
}

#[tokio::test]
async fn runaway_loop_hits_recursion_limit() {
    let mut graph = StateGraph::<CounterState>::new().with_recursion_limit(4);
    graph
        .add_node("inc", Arc::new(AddNode::new("inc", 1)))
        .add_edge(START, "inc")
        .add_conditional_edges(
            "inc",
            |_: &CounterState| "again".to_string(),
            [("again", "inc"), ("stop", END)],
        );
    let failure = graph
        .compile()
        .unwrap()
        .invoke(CounterState::default())
        .await
        .unwrap_err();
    assert!(matches!(failure.error, AgentError::RecursionLimit(4)), "{}", failure);
}
