//! Run configuration: provider, model keys, classification knobs and output directories.
//!
//! [`RunConfig::from_env`] reads the environment (after `.env` is loaded);
//! [`RunOptions`] carries CLI overrides applied with [`RunConfig::apply_options`].

mod run_config;
mod run_options;

pub use run_config::{Error, Provider, RunConfig, DEFAULT_OPENAI_MODEL};
pub use run_options::RunOptions;
