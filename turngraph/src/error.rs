//! Agent execution error types.
//!
//! Used by `Node::run` and every node in the classification and debate pipelines.
//! Collaborator failures (classifier, text generation) are wrapped so the executor can
//! surface one error type; `ErrorKind` groups variants by how they were handled.

use thiserror::Error;

use crate::classify::ClassifierError;
use crate::llm::GenerationError;

/// Coarse grouping of [`AgentError`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nodes ran out of order (expected speaker mismatch).
    Sequencing,
    /// A validator kept failing after its bounded retry.
    Validation,
    /// A collaborator resource (model files, lexicon) is missing or invalid.
    Resource,
    /// The generation collaborator exhausted its retry policy.
    External,
    /// The interactive collaborator was interrupted.
    Interrupted,
    /// Graph-level failure (unknown branch, step limit, empty graph).
    Execution,
}

/// Agent execution error.
///
/// Returned by `Node::run` when a step fails. Every variant is fatal for the run: retries
/// happen inside nodes and collaborators, never in the executor.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The node about to speak is not the speaker derived from the turn counter.
    #[error("turn violation: expected {expected}, got {got}")]
    TurnViolation { expected: String, got: String },

    /// Generated text repeated an earlier argument even after the retry.
    #[error("repeated argument after retry: {0}")]
    RepeatedArgument(String),

    /// Classifier could not be loaded or run.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Text generation failed after all candidate models and passes.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Interactive confirmation was interrupted (EOF, Ctrl-C, closed terminal).
    #[error("interrupted: {0}")]
    Interrupted(String),

    /// The graph ran more node steps than its recursion limit allows.
    #[error("recursion limit of {0} steps reached")]
    RecursionLimit(usize),

    /// Execution failed with a message (e.g. router returned an unknown branch).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A node error plus the diagnostics the node recorded before it failed. Displays as the
    /// inner error; error recorders append `diagnostics` to the state before the error line.
    #[error("{error}")]
    Diagnosed {
        diagnostics: Vec<String>,
        error: Box<AgentError>,
    },
}

impl AgentError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TurnViolation { .. } => ErrorKind::Sequencing,
            Self::RepeatedArgument(_) => ErrorKind::Validation,
            Self::Classifier(_) => ErrorKind::Resource,
            Self::Generation(_) => ErrorKind::External,
            Self::Interrupted(_) => ErrorKind::Interrupted,
            Self::RecursionLimit(_) | Self::ExecutionFailed(_) => ErrorKind::Execution,
            Self::Diagnosed { error, .. } => error.kind(),
        }
    }

    /// Attaches diagnostics recorded before the failure. Empty diagnostics leave `self` as is.
    pub fn with_diagnostics(self, diagnostics: Vec<String>) -> Self {
        if diagnostics.is_empty() {
            return self;
        }
        match self {
            Self::Diagnosed {
                diagnostics: mut earlier,
                error,
            } => {
                earlier.extend(diagnostics);
                Self::Diagnosed {
                    diagnostics: earlier,
                    error,
                }
            }
            other => Self::Diagnosed {
                diagnostics,
                error: Box::new(other),
            },
        }
    }

    /// Diagnostics recorded by the failing node, oldest first.
    pub fn diagnostics(&self) -> &[String] {
        match self {
            Self::Diagnosed { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }

    /// The underlying error without attached diagnostics.
    pub fn root(&self) -> &AgentError {
        match self {
            Self::Diagnosed { error, .. } => error.root(),
            other => other,
        }
    }
}
