//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Holds nodes, the entry node, one outgoing definition per
//! node, optional middleware and error recorder. The run loop executes one node at a time,
//! commits its state, then resolves the successor from the node's `Next` and the graph's
//! edges.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;
use crate::stream::{StreamEvent, StreamMode};

use super::logging::{log_graph_complete, log_graph_error, log_graph_start, log_route};
use super::node_middleware::{NodeFuture, NodeMiddleware};
use super::state_graph::{ErrorRecorder, Outgoing, END};
use super::{Next, Node, RunContext, RunFailure};

/// Compiled graph: immutable structure, supports invoke and stream.
///
/// Runs from the entry node; after each node, `Next::Continue` follows the node's plain edge
/// or asks its router for a branch, `Next::Node(id)` jumps, `Next::End` stops.
#[derive(Clone)]
pub struct CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) entry: String,
    pub(super) outgoing: HashMap<String, Outgoing<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) error_recorder: Option<ErrorRecorder<S>>,
    pub(super) recursion_limit: usize,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Id of the first node run by `invoke`.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Runs one node, through the middleware when set.
    async fn run_node(
        &self,
        node: Arc<dyn Node<S>>,
        node_id: &str,
        state: S,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<(S, Next), AgentError> {
        if let Some(middleware) = &self.middleware {
            let run_ctx_owned = run_ctx.cloned();
            middleware
                .around_run(
                    node_id,
                    state,
                    Box::new(move |s: S| {
                        Box::pin(async move {
                            match run_ctx_owned.as_ref() {
                                Some(ctx) => node.run_with_context(s, ctx).await,
                                None => node.run(s).await,
                            }
                        }) as NodeFuture<S>
                    }),
                )
                .await
        } else if let Some(ctx) = run_ctx {
            node.run_with_context(state, ctx).await
        } else {
            node.run(state).await
        }
    }

    /// Picks the successor of `current` for `Next::Continue`.
    fn resolve_next(&self, current: &str, state: &S) -> Result<String, AgentError> {
        match self.outgoing.get(current) {
            Some(Outgoing::Edge(to)) => Ok(to.clone()),
            Some(Outgoing::Conditional { router, path_map }) => {
                let branch = router(state);
                let to = path_map.get(&branch).ok_or_else(|| {
                    AgentError::ExecutionFailed(format!(
                        "router for {} returned unknown branch: {}",
                        current, branch
                    ))
                })?;
                log_route(current, &branch, to);
                Ok(to.clone())
            }
            None => Err(AgentError::ExecutionFailed(format!(
                "no outgoing edge from {}",
                current
            ))),
        }
    }

    fn fail(&self, mut state: S, node_id: &str, error: AgentError) -> RunFailure<S> {
        log_graph_error(node_id, &error);
        if let Some(record) = &self.error_recorder {
            record(&mut state, node_id, &error);
        }
        RunFailure {
            node_id: node_id.to_string(),
            error,
            state,
        }
    }

    /// Shared run loop used by invoke() and stream(): steps through nodes until END.
    async fn run_loop(
        &self,
        mut state: S,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<S, RunFailure<S>> {
        let mut current = self.entry.clone();
        let mut steps = 0usize;
        log_graph_start(&current);

        loop {
            if steps >= self.recursion_limit {
                let limit = AgentError::RecursionLimit(self.recursion_limit);
                return Err(self.fail(state, &current, limit));
            }
            steps += 1;

            let node = match self.nodes.get(&current) {
                Some(node) => Arc::clone(node),
                None => {
                    let missing =
                        AgentError::ExecutionFailed(format!("node not found: {}", current));
                    return Err(self.fail(state, &current, missing));
                }
            };

            let (new_state, next) = match self
                .run_node(node, &current, state.clone(), run_ctx)
                .await
            {
                Ok(out) => out,
                Err(e) => return Err(self.fail(state, &current, e)),
            };
            state = new_state;

            if let Some(ctx) = run_ctx {
                if let Some(tx) = &ctx.stream_tx {
                    if ctx.stream_mode.contains(&StreamMode::Values) {
                        let _ = tx.send(StreamEvent::Values(state.clone())).await;
                    }
                    if ctx.stream_mode.contains(&StreamMode::Updates) {
                        let _ = tx
                            .send(StreamEvent::Updates {
                                node_id: current.clone(),
                                state: state.clone(),
                            })
                            .await;
                    }
                }
            }

            let target = match next {
                Next::End => break,
                Next::Node(id) => id,
                Next::Continue => match self.resolve_next(&current, &state) {
                    Ok(to) => to,
                    Err(e) => return Err(self.fail(state, &current, e)),
                },
            };
            if target == END {
                break;
            }
            current = target;
        }

        log_graph_complete(steps);
        Ok(state)
    }

    /// Runs the graph with the given state until END.
    ///
    /// On failure, returns the node id, the error, and the last committed state (with the
    /// error recorded into it when an `on_error` hook is set).
    pub async fn invoke(&self, state: S) -> Result<S, RunFailure<S>> {
        self.run_loop(state, None).await
    }

    /// Runs the graph on a spawned task, emitting events for the selected modes.
    ///
    /// Returns the event stream and the handle resolving to the run result. The stream ends
    /// when the run finishes.
    pub fn stream(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> (
        ReceiverStream<StreamEvent<S>>,
        JoinHandle<Result<S, RunFailure<S>>>,
    ) {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let run_ctx = RunContext {
            stream_tx: Some(tx),
            stream_mode: stream_mode.into(),
        };

        let handle = tokio::spawn(async move { graph.run_loop(state, Some(&run_ctx)).await });

        (ReceiverStream::new(rx), handle)
    }
}
