//! Two-persona debate pipeline.
//!
//! The Scientist and the Philosopher alternate turns through a [`TextGenerator`]
//! (`agent`); after every turn `memory` rewrites the global summary and each speaker's view
//! of the opponent; after [`MAX_ROUNDS`] turns `judge` picks a winner.
//!
//! [`TextGenerator`]: crate::llm::TextGenerator

mod agent_node;
mod judge_node;
mod memory_node;
pub mod prompts;
mod runner;
mod state;
mod topic_node;
pub mod validators;

pub use agent_node::AgentNode;
pub use judge_node::{parity_winner, parse_verdict, JudgeNode, Verdict};
pub use memory_node::{route_after_memory, MemoryNode};
pub use runner::{build_debate_graph, run_debate, stream_debate};
pub use state::{DebateState, Speaker, Utterance};
pub use topic_node::TopicNode;

/// Number of turns before the judge is called.
pub const MAX_ROUNDS: usize = 8;

/// Minimum trimmed length of a coherent turn, in characters.
pub const MIN_COHERENT_LEN: usize = 10;
