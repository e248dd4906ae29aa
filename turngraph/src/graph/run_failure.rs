//! Failed graph run: the error plus the last committed state.

use std::fmt::Debug;

use thiserror::Error;

use crate::error::AgentError;

/// A run that aborted in a node.
///
/// `state` is the state committed before the failing node ran. When the graph was built with
/// [`StateGraph::on_error`](super::StateGraph::on_error), the error has already been recorded
/// into it, so partial history stays inspectable.
#[derive(Debug, Error)]
#[error("node {node_id} failed: {error}")]
pub struct RunFailure<S>
where
    S: Debug,
{
    /// Id of the node that failed.
    pub node_id: String,
    /// The error the node returned.
    #[source]
    pub error: AgentError,
    /// Last committed state.
    pub state: S,
}

impl<S: Debug> RunFailure<S> {
    /// Drops the partial state and keeps the error.
    pub fn into_error(self) -> AgentError {
        self.error
    }
}
