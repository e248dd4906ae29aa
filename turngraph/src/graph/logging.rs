//! Logging helpers for graph execution.
//!
//! Structured `tracing` events for graph and node lifecycle. Used by the executor and by
//! [`LoggingNodeMiddleware`](super::LoggingNodeMiddleware).

use crate::error::AgentError;

use super::Next;

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "node enter");
}

/// Log node execution completion with its routing hint.
pub fn log_node_complete(node_id: &str, next: &Next) {
    tracing::debug!(node_id = node_id, ?next, "node exit");
}

/// Log a node that returned an error.
pub fn log_node_failed(node_id: &str, error: &AgentError) {
    tracing::error!(node_id = node_id, %error, "node failed");
}

/// Log the branch chosen by a conditional router.
pub fn log_route(from: &str, branch: &str, to: &str) {
    tracing::debug!(from = from, branch = branch, to = to, "route");
}

/// Log graph execution start.
pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "graph start");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps = steps, "graph complete");
}

/// Log graph execution error.
pub fn log_graph_error(node_id: &str, error: &AgentError) {
    tracing::error!(node_id = node_id, kind = ?error.kind(), %error, "graph aborted");
}
