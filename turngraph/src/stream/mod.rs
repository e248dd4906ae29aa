//! Streaming types for graph runs.
//!
//! Defines stream modes and events for value, update and custom streaming. Used by
//! `CompiledStateGraph::stream` and nodes that emit progress through `RunContext`.

use serde_json::Value;
use std::fmt::Debug;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit full state after each node completes.
    Values,
    /// Emit the node id and state after each node completes.
    Updates,
    /// Emit custom JSON payloads from nodes (e.g. debate progress lines).
    Custom,
}

/// Streamed event emitted while running a graph.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after a node finishes.
    Values(S),
    /// Node id and state after that node.
    Updates { node_id: String, state: S },
    /// Custom JSON payload sent by a node.
    Custom(Value),
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    /// **Scenario**: Progress payloads ride in `Custom`; snapshots carry the node id.
    #[test]
    fn custom_and_update_events_hold_payloads() {
        let progress: StreamEvent<u32> =
            StreamEvent::Custom(json!({"round": 1, "line": "[Round 1] Scientist: hi"}));
        let StreamEvent::Custom(payload) = progress else {
            panic!("expected Custom");
        };
        assert_eq!(payload["round"], 1);
        assert_eq!(payload["line"], "[Round 1] Scientist: hi");

        let update = StreamEvent::Updates {
            node_id: "memory".into(),
            state: 3u32,
        };
        match update {
            StreamEvent::Updates { node_id, state } => {
                assert_eq!(node_id, "memory");
                assert_eq!(state, 3);
            }
            other => panic!("expected Updates, got {:?}", other),
        }
    }

    #[test]
    fn modes_deduplicate_in_a_set() {
        let modes: HashSet<StreamMode> =
            [StreamMode::Custom, StreamMode::Values, StreamMode::Custom].into();
        assert_eq!(modes.len(), 2);
        assert!(!modes.contains(&StreamMode::Updates));
    }
}
