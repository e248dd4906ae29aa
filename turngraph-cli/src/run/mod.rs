//! Subcommand implementations: `classify`, `debate`, `draw`.
//!
//! Each command takes a resolved [`RunConfig`](crate::config::RunConfig). The pieces that
//! do not touch the terminal (graph building, one run, rendering) are public so tests can
//! drive them with scripted collaborators.

mod classify;
mod debate;
mod draw;
mod generator;

pub use classify::{
    classification_graph, classify_command, classify_one, load_classifier,
    render_classification, DialoguerConfirmer,
};
pub use debate::{
    debate_command, debate_with_generator, render_verdict, resolve_topic, DEFAULT_TOPIC,
};
pub use draw::{dot_path, draw_command, render_dot, GraphKind};
pub use generator::build_generator;
