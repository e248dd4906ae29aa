//! Self-healing classification pipeline.
//!
//! `inference` classifies the text, `confidence_check` accepts the label when the confidence
//! reaches the threshold, otherwise `fallback` asks the user a yes/no question and corrects
//! the label. Collaborators: [`Classifier`] and [`Confirmer`].

mod classifier;
mod confidence_node;
mod confirm;
mod fallback_node;
mod inference_node;
mod runner;
mod state;

pub use classifier::{
    softmax, Classification, Classifier, ClassifierError, LexiconClassifier, LEXICON_FILE,
    MAX_WEIGHT,
};
pub use confidence_node::{route_after_confidence, ConfidenceCheckNode};
pub use confirm::{Confirmer, ScriptedConfirmer};
pub use fallback_node::{FallbackNode, USER_CLARIFICATION};
pub use inference_node::InferenceNode;
pub use runner::{
    build_classification_graph, run_classification, ClassifyConfig, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_CONFIRMATION_PROMPT, DEFAULT_MAX_LENGTH,
};
pub use state::{ClassificationState, Route, Sentiment};
