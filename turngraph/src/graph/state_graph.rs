//! State graph: nodes + explicit edges (from → to) + conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using `START` and `END` for
//! entry/exit, fork with `add_conditional_edges(from, router, path_map)`, then `compile` to get
//! a `CompiledStateGraph`.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)` or as a path-map target.
pub const END: &str = "__end__";

/// Default number of node steps before a run is aborted with `AgentError::RecursionLimit`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Pure routing function: reads the state and returns a branch key of the path map.
pub type Router<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Hook that records a fatal node error into the last committed state.
pub type ErrorRecorder<S> = Arc<dyn Fn(&mut S, &str, &AgentError) + Send + Sync>;

/// Outgoing definition of one node.
pub(super) enum Outgoing<S> {
    /// Single unconditional successor (node id or END).
    Edge(String),
    /// Router plus branch key → successor map.
    Conditional {
        router: Router<S>,
        path_map: BTreeMap<String, String>,
    },
}

impl<S> Clone for Outgoing<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Edge(to) => Self::Edge(to.clone()),
            Self::Conditional { router, path_map } => Self::Conditional {
                router: Arc::clone(router),
                path_map: path_map.clone(),
            },
        }
    }
}

/// State graph: nodes plus plain and conditional edges.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge` /
/// `add_conditional_edges`, then `compile()` to obtain an executable graph.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Plain edges (from_id, to_id).
    edges: Vec<(String, String)>,
    /// Conditional edges in insertion order.
    conditional: Vec<(String, Router<S>, BTreeMap<String, String>)>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    error_recorder: Option<ErrorRecorder<S>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional: Vec::new(),
            middleware: None,
            error_recorder: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Attaches node middleware; the compiled graph wraps each node run with it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Sets the hook that records a fatal node error into the last committed state before
    /// the failure is returned to the caller.
    pub fn on_error<F>(self, recorder: F) -> Self
    where
        F: Fn(&mut S, &str, &AgentError) + Send + Sync + 'static,
    {
        Self {
            error_recorder: Some(Arc::new(recorder)),
            ..self
        }
    }

    /// Sets the maximum number of node steps per run.
    pub fn with_recursion_limit(self, limit: usize) -> Self {
        Self {
            recursion_limit: limit,
            ..self
        }
    }

    /// Adds a node; id must be unique. Replaces if same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except START/END)
    /// must be registered via `add_node` before `compile()`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds a conditional edge: after `from_id` returns `Next::Continue`, `router(&state)`
    /// picks a key and the run continues at `path_map[key]` (a node id or `END`).
    pub fn add_conditional_edges<F, K, V>(
        &mut self,
        from_id: impl Into<String>,
        router: F,
        path_map: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
        K: Into<String>,
        V: Into<String>,
    {
        let path_map = path_map
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.conditional
            .push((from_id.into(), Arc::new(router), path_map));
        self
    }

    /// Builds the executable graph.
    ///
    /// Returns `CompilationError` if any edge references an unknown node, the entry edge is
    /// missing or duplicated, or a node has zero or several outgoing definitions.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let known = |id: &str| self.nodes.contains_key(id);

        for (from, to) in &self.edges {
            if from != START && !known(from.as_str()) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !known(to.as_str()) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (from, _, path_map) in &self.conditional {
            if !known(from.as_str()) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if path_map.is_empty() {
                return Err(CompilationError::EmptyPathMap(from.clone()));
            }
            if let Some(to) = path_map
                .values()
                .find(|to| to.as_str() != END && !known(to.as_str()))
            {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }

        let start_edges: Vec<_> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .collect();
        let entry = match start_edges.as_slice() {
            [only] if only != END => only.clone(),
            _ => return Err(CompilationError::MissingStart),
        };

        let mut outgoing: HashMap<String, Outgoing<S>> = HashMap::new();
        for (from, to) in self.edges.into_iter().filter(|(f, _)| f != START) {
            if outgoing.insert(from.clone(), Outgoing::Edge(to)).is_some() {
                return Err(CompilationError::DuplicateOutgoing(from));
            }
        }
        for (from, router, path_map) in self.conditional {
            if outgoing
                .insert(from.clone(), Outgoing::Conditional { router, path_map })
                .is_some()
            {
                return Err(CompilationError::DuplicateOutgoing(from));
            }
        }

        let mut ids: Vec<_> = self.nodes.keys().collect();
        ids.sort();
        if let Some(dead) = ids.into_iter().find(|id| !outgoing.contains_key(*id)) {
            return Err(CompilationError::DeadEnd(dead.clone()));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            entry,
            outgoing,
            middleware: self.middleware,
            error_recorder: self.error_recorder,
            recursion_limit: self.recursion_limit,
        })
    }
}
