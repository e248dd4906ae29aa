//! Node middleware selection for the CLI graphs.
//!
//! With `--verbose` every node run is wrapped in [`LoggingNodeMiddleware`] (enter/exit at
//! debug, failures at error).

use std::fmt::Debug;
use std::sync::Arc;

use turngraph::{LoggingNodeMiddleware, NodeMiddleware};

/// Middleware to pass to the graph builders: logging when `verbose`, none otherwise.
pub fn node_logging<S>(verbose: bool) -> Option<Arc<dyn NodeMiddleware<S>>>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    verbose.then(|| Arc::new(LoggingNodeMiddleware) as Arc<dyn NodeMiddleware<S>>)
}
