//! Run context passed into nodes for streaming-aware execution.
//!
//! Holds the optional stream sender plus the selected stream modes.

use std::collections::HashSet;
use std::fmt::Debug;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::stream::{StreamEvent, StreamMode};

#[derive(Clone)]
pub struct RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Optional sender for streaming events.
    pub stream_tx: Option<mpsc::Sender<StreamEvent<S>>>,
    /// Enabled stream modes (Values, Updates, Custom).
    pub stream_mode: HashSet<StreamMode>,
}

impl<S> RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Sends a custom payload when `StreamMode::Custom` is enabled. A dropped receiver is
    /// ignored; progress events never fail a run.
    pub async fn emit_custom(&self, payload: Value) {
        if !self.stream_mode.contains(&StreamMode::Custom) {
            return;
        }
        if let Some(tx) = &self.stream_tx {
            let _ = tx.send(StreamEvent::Custom(payload)).await;
        }
    }
}
