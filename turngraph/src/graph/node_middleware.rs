//! Middleware wrapped around every node invocation.
//!
//! Set with [`StateGraph::with_middleware`](super::StateGraph::with_middleware). The
//! middleware receives the node id and a boxed closure that runs the node; it must call the
//! closure at most once and may inspect or log the result.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::AgentError;

use super::logging::{log_node_complete, log_node_failed, log_node_start};
use super::Next;

/// Boxed future returned by the inner node call.
pub type NodeFuture<S> = Pin<Box<dyn Future<Output = Result<(S, Next), AgentError>> + Send>>;

/// Boxed closure that runs the wrapped node.
pub type NodeCall<S> = Box<dyn FnOnce(S) -> NodeFuture<S> + Send>;

/// Wraps each node run (logging, timing, ...).
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Send + 'static,
{
    /// Runs `inner(state)` with behaviour around it and returns its result.
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeCall<S>,
    ) -> Result<(S, Next), AgentError>;
}

/// Middleware that logs node enter/exit at debug level and failures at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingNodeMiddleware;

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware
where
    S: Send + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeCall<S>,
    ) -> Result<(S, Next), AgentError> {
        log_node_start(node_id);
        let result = inner(state).await;
        match &result {
            Ok((_, next)) => log_node_complete(node_id, next),
            Err(e) => log_node_failed(node_id, e),
        }
        result
    }
}
