//! Node trait: one step of a state graph.
//!
//! A node receives the current state by value and returns the updated state plus a [`Next`]
//! routing hint. The executor owns the state between steps, so a node is the single writer
//! while it runs.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::AgentError;

use super::{Next, RunContext};

/// One step in a [`StateGraph`](super::StateGraph).
///
/// Implementors do one unit of work (classify, check confidence, generate a turn, ...) and
/// return the new state. Returning `Err` aborts the whole run; nodes retry internally when a
/// failure is recoverable.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id, used in logs and stream events.
    fn id(&self) -> &str;

    /// Runs the step on `state` and returns the updated state and routing hint.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;

    /// Context-aware variant used by `CompiledStateGraph::stream`. Nodes that emit progress
    /// events override this; the default ignores the context.
    async fn run_with_context(
        &self,
        state: S,
        _ctx: &RunContext<S>,
    ) -> Result<(S, Next), AgentError> {
        self.run(state).await
    }
}
