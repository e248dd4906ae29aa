//! Routing hint returned by every node alongside the updated state.

/// What the executor does after a node returns.
///
/// Most nodes return `Continue` and let the graph's edges decide; conditional routing lives in
/// the router passed to [`StateGraph::add_conditional_edges`](super::StateGraph::add_conditional_edges),
/// not in the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// Follow the node's outgoing edge (plain or conditional).
    Continue,
    /// Jump to the node with this id.
    Node(String),
    /// Stop and return the current state.
    End,
}
