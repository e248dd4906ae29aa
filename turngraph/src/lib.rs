//! # turngraph
//!
//! A small turn-taking state machine in Rust and two pipelines built on it. One state type
//! flows through named nodes (**state-in, state-out**); after every node the executor follows
//! exactly one edge, either a plain edge or a pure router over the state.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, middleware and streaming.
//! - [`classify`]: self-healing classification (inference → confidence check → accept or ask
//!   the user).
//! - [`debate`]: Scientist vs Philosopher debate (agent ⇄ memory for eight turns, then judge).
//! - [`llm`]: `TextGenerator` trait, model rotation/back-off policy, `MockLlm`, and the
//!   Gemini / OpenAI backends behind features.
//!
//! ## Features
//!
//! - `gemini` (default): `GeminiClient` over the REST API (reqwest).
//! - `openai`: `ChatOpenAI` backend via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use turngraph::{build_debate_graph, run_debate, MockLlm};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let graph = build_debate_graph(Arc::new(MockLlm::new()), None).unwrap();
//! let state = run_debate(&graph, "Should AI be regulated like medicine?").await.unwrap();
//! println!("winner: {:?}", state.final_winner);
//! # }
//! ```

pub mod classify;
pub mod debate;
pub mod error;
pub mod graph;
pub mod llm;
pub mod stream;

pub use classify::{
    build_classification_graph, run_classification, ClassificationState, Classifier,
    ClassifierError, ClassifyConfig, Confirmer, LexiconClassifier, Route, ScriptedConfirmer,
    Sentiment,
};
pub use debate::{
    build_debate_graph, run_debate, stream_debate, DebateState, Speaker, Utterance, MAX_ROUNDS,
};
pub use error::{AgentError, ErrorKind};
pub use graph::{
    CompilationError, CompiledStateGraph, LoggingNodeMiddleware, Next, Node, NodeMiddleware,
    RunContext, RunFailure, StateGraph, END, START,
};
pub use llm::{
    GenerationError, GenerationParams, MockLlm, ModelBackend, RetryPolicy, RotatingGenerator,
    TextGenerator,
};
#[cfg(feature = "gemini")]
pub use llm::GeminiClient;
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use stream::{StreamEvent, StreamMode};
