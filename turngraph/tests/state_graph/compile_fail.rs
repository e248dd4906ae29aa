//! StateGraph compile failure cases: unknown node, missing entry, dead end, etc.

use std::sync::Arc;

use turngraph::{CompilationError, StateGraph, END, START};

use crate::common::{AddNode, CounterState};

#[tokio::test]
async fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_edge(START, "a");
    graph.add_edge("a", "missing");

    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("expected NodeNotFound, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_without_start_edge() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_edge("a", END);
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

#[test]
fn compile_fails_with_two_start_edges() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_node("b", Arc::new(AddNode::new("b", 1)));
    graph.add_edge(START, "a");
    graph.add_edge(START, "b");
    graph.add_edge("a", END);
    graph.add_edge("b", END);
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

#[test]
fn compile_fails_when_node_has_no_outgoing_edge() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_node("b", Arc::new(AddNode::new("b", 1)));
    graph.add_edge(START, "a");
    graph.add_edge("a", "b");
    match graph.compile() {
        Err(CompilationError::DeadEnd(id)) => assert_eq!(id, "b"),
        other => panic!("expected DeadEnd, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_on_plain_and_conditional_from_same_node() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_edge(START, "a");
    graph.add_edge("a", END);
    graph.add_conditional_edges("a", |_: &CounterState| "done".to_string(), [("done", END)]);
    match graph.compile() {
        Err(CompilationError::DuplicateOutgoing(id)) => assert_eq!(id, "a"),
        other => panic!("expected DuplicateOutgoing, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_on_unknown_path_map_target() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_edge(START, "a");
    graph.add_conditional_edges(
        "a",
        |_: &CounterState| "x".to_string(),
        [("x", "ghost"), ("y", END)],
    );
    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "ghost"),
        other => panic!("expected NodeNotFound, got {:?}", other.err()),
    }
}

#[test]
fn compile_fails_on_empty_path_map() {
    let mut graph = StateGraph::<CounterState>::new();
    graph.add_node("a", Arc::new(AddNode::new("a", 1)));
    graph.add_edge(START, "a");
    graph.add_conditional_edges(
        "a",
        |_: &CounterState| "x".to_string(),
        Vec::<(String, String)>::new(),
    );
    assert!(matches!(
        graph.compile(),
        Err(CompilationError::EmptyPathMap(id)) if id == "a"
    ));
}
