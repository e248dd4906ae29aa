//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when edges reference unknown nodes or the topology
//! leaves the executor without exactly one way forward from some node.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Validation ensures every id in edges and path maps (except START/END) exists, there is a
/// single entry edge, and every node has exactly one outgoing definition.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge or path map was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has from_id == START, or more than one such edge.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// A node has more than one outgoing edge definition (plain or conditional).
    #[error("node has more than one outgoing edge: {0}")]
    DuplicateOutgoing(String),

    /// A node has no outgoing edge, so the run could never leave it.
    #[error("node has no outgoing edge: {0}")]
    DeadEnd(String),

    /// A conditional edge was added with an empty path map.
    #[error("conditional edge from {0} has an empty path map")]
    EmptyPathMap(String),
}
