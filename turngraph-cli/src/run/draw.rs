//! `draw` subcommand: write a pipeline topology as Graphviz DOT.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use turngraph::classify::{ClassifyConfig, LexiconClassifier, ScriptedConfirmer};
use turngraph::debate::build_debate_graph;
use turngraph::llm::MockLlm;

use crate::config::{Error, RunConfig};

/// Which pipeline to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphKind {
    Classify,
    Debate,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Classify => "classify",
            Self::Debate => "debate",
        })
    }
}

/// DOT source for `kind`. Collaborators are placeholders; only the topology matters.
pub fn render_dot(kind: GraphKind) -> Result<String, Error> {
    let name = format!("{}_graph", kind);
    let dot = match kind {
        GraphKind::Classify => turngraph::build_classification_graph(
            &ClassifyConfig::default(),
            Arc::new(LexiconClassifier::builtin()),
            Arc::new(ScriptedConfirmer::default()),
            None,
        )?
        .to_dot(&name),
        GraphKind::Debate => build_debate_graph(Arc::new(MockLlm::new()), None)?.to_dot(&name),
    };
    Ok(dot)
}

/// Target path: `output` if absolute, else joined onto `artifacts_dir`; default
/// `<kind>_graph.dot`.
pub fn dot_path(artifacts_dir: &Path, kind: GraphKind, output: Option<&Path>) -> PathBuf {
    match output {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => artifacts_dir.join(p),
        None => artifacts_dir.join(format!("{}_graph.dot", kind)),
    }
}

/// Runs the `draw` subcommand and returns the written path.
pub fn draw_command(
    config: &RunConfig,
    kind: GraphKind,
    output: Option<&Path>,
) -> Result<PathBuf, Error> {
    let path = dot_path(&config.artifacts_dir, kind, output);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render_dot(kind)?)?;
    tracing::info!(graph = %kind, path = %path.display(), "topology written");
    Ok(path)
}
