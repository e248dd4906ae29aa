//! State graph: nodes, plain and conditional edges, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: add nodes and edges, compile, then invoke with state.
//! Conditional edges take a pure router over the state and a branch → node map; the executor
//! follows exactly one edge after every node and stops at `END`.

mod compile_error;
mod compiled;
mod dot;
mod logging;
mod next;
mod node;
mod node_middleware;
mod run_context;
mod run_failure;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use next::Next;
pub use node::Node;
pub use node_middleware::{LoggingNodeMiddleware, NodeCall, NodeFuture, NodeMiddleware};
pub use run_context::RunContext;
pub use run_failure::RunFailure;
pub use state_graph::{ErrorRecorder, Router, StateGraph, DEFAULT_RECURSION_LIMIT, END, START};
