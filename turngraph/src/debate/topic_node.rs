//! Entry node: records the topic.

use async_trait::async_trait;
use tracing::info;

use crate::error::AgentError;
use crate::graph::{Next, Node};

use super::DebateState;

/// Logs the topic and appends it to `events`. Leaves everything else untouched.
pub struct TopicNode;

#[async_trait]
impl Node<DebateState> for TopicNode {
    fn id(&self) -> &str {
        "user_input"
    }

    async fn run(&self, state: DebateState) -> Result<(DebateState, Next), AgentError> {
        info!(topic = %state.topic, "[UserInputNode] topic received");
        let mut events = state.events;
        events.push(format!("[UserInputNode] Topic: {}", state.topic));
        Ok((DebateState { events, ..state }, Next::Continue))
    }
}
