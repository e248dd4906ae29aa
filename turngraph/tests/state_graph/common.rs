//! Shared node and state types for StateGraph integration tests.

use async_trait::async_trait;
use turngraph::{AgentError, Next, Node};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CounterState {
    pub value: i32,
    pub visited: Vec<String>,
    pub errors: Vec<String>,
}

/// Adds `delta` and records its id.
pub struct AddNode {
    pub id: &'static str,
    pub delta: i32,
}

impl AddNode {
    pub fn new(id: &'static str, delta: i32) -> Self {
        Self { id, delta }
    }
}

#[async_trait]
impl Node<CounterState> for AddNode {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(&self, state: CounterState) -> Result<(CounterState, Next), AgentError> {
        let mut visited = state.visited;
        visited.push(self.id.to_string());
        Ok((
            CounterState {
                value: state.value + self.delta,
                visited,
                ..state
            },
            Next::Continue,
        ))
    }
}

/// Always fails.
pub struct FailNode;

#[async_trait]
impl Node<CounterState> for FailNode {
    fn id(&self) -> &str {
        "fail"
    }

    async fn run(&self, _state: CounterState) -> Result<(CounterState, Next), AgentError> {
        Err(AgentError::ExecutionFailed("boom".into()))
    }
}
