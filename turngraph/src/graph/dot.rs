//! Graphviz DOT rendering of a compiled graph's topology.

use std::fmt::{Debug, Write};

use super::state_graph::{Outgoing, END, START};
use super::CompiledStateGraph;

fn dot_id(id: &str) -> &str {
    match id {
        START => "START",
        END => "END",
        other => other,
    }
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Renders the topology as a DOT digraph: one box per node, START/END as ovals,
    /// conditional edges labelled with their branch key. Output is sorted and stable.
    pub fn to_dot(&self, name: &str) -> String {
        let mut ids: Vec<&String> = self.nodes.keys().collect();
        ids.sort();

        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", name);
        let _ = writeln!(out, "  rankdir=LR;");
        let _ = writeln!(out, "  \"START\" [shape=oval];");
        let _ = writeln!(out, "  \"END\" [shape=oval];");
        for id in &ids {
            let _ = writeln!(out, "  \"{}\" [shape=box, style=rounded];", id);
        }
        let _ = writeln!(out, "  \"START\" -> \"{}\";", self.entry);
        for id in &ids {
            match self.outgoing.get(id.as_str()) {
                Some(Outgoing::Edge(to)) => {
                    let _ = writeln!(out, "  \"{}\" -> \"{}\";", id, dot_id(to));
                }
                Some(Outgoing::Conditional { path_map, .. }) => {
                    for (branch, to) in path_map {
                        let _ = writeln!(
                            out,
                            "  \"{}\" -> \"{}\" [label=\"{}\"];",
                            id,
                            dot_id(to),
                            branch
                        );
                    }
                }
                None => {}
            }
        }
        out.push_str("}\n");
        out
    }
}
