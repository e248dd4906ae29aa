//! turngraph-cli library: configuration, logging and subcommand logic for the `turngraph`
//! binary.
//!
//! Reads provider keys and pipeline knobs from `.env`, builds the classification or debate
//! graph from `turngraph` and runs it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), turngraph_cli::Error> {
//! let mut config = turngraph_cli::RunConfig::from_env()?;
//! config.provider = turngraph_cli::Provider::Mock;
//! let log = turngraph_cli::init_tracing(&config.log_dir, "run.log", false)?;
//! turngraph_cli::debate_command(&config, &log).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod logging;
mod middleware;
mod run;

pub use config::{Error, Provider, RunConfig, RunOptions, DEFAULT_OPENAI_MODEL};
pub use logging::{debate_log_file, init_tracing, CLASSIFY_LOG_FILE};
pub use middleware::node_logging;
pub use run::{
    build_generator, classification_graph, classify_command, classify_one, debate_command,
    debate_with_generator, dot_path, draw_command, load_classifier, render_classification,
    render_dot, render_verdict, resolve_topic, DialoguerConfirmer, GraphKind, DEFAULT_TOPIC,
};

#[cfg(test)]
mod tests;
