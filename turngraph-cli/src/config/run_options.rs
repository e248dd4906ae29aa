//! Optional overrides for a run (CLI flags or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options). Callers (the binary
//! or tests) build a `RunOptions` and apply it to the env-based config.

/// Optional overrides for a run. Only set fields override the base config.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Override the confidence threshold; still validated to lie in (0, 1).
    pub threshold: Option<f32>,
    /// Override the debate topic.
    pub topic: Option<String>,
    /// Print results as JSON instead of text.
    pub json: bool,
    /// Attach node enter/exit logging.
    pub verbose: bool,
}
