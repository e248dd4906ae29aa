//! Generation collaborator errors.

use std::time::Duration;

use thiserror::Error;

/// Error from one generation attempt or from the exhausted retry policy.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// The model id does not exist for this API; rotate to the next candidate.
    #[error("model not found: {model}: {message}")]
    NotFound { model: String, message: String },

    /// Quota or rate limit hit; `retry_after` is the delay suggested by the API, if any.
    #[error("rate limited on {model}: {message}")]
    RateLimited {
        model: String,
        message: String,
        retry_after: Option<Duration>,
    },

    /// The model answered without any text, also after the relaxed retry.
    #[error("model {model} returned no text")]
    EmptyResponse { model: String },

    /// Missing or rejected credentials. Never retried.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Network or decoding failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Any other non-success API response.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The candidate model list is empty.
    #[error("no candidate models available")]
    NoCandidates,
}

impl GenerationError {
    /// Whether the rotation policy moves on to the next candidate model.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::RateLimited { .. } | Self::EmptyResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_rotation_cases_only() {
        assert!(GenerationError::NotFound {
            model: "m".into(),
            message: "gone".into()
        }
        .is_transient());
        assert!(GenerationError::EmptyResponse { model: "m".into() }.is_transient());
        assert!(!GenerationError::Unauthorized("no key".into()).is_transient());
        assert!(!GenerationError::Transport("reset".into()).is_transient());
    }
}
