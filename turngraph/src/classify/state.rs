//! Classification state and its small value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary sentiment label. Index order matches the classifier's logits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Labels in logit order.
    pub const LABELS: [Sentiment; 2] = [Sentiment::Negative, Sentiment::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision of the confidence check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Accept,
    Fallback,
}

impl Route {
    /// Branch key used in the conditional edge path map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Fallback => "fallback",
        }
    }
}

/// State flowing through the classification graph.
///
/// `text` is set once by the caller. The inference node fills `prediction`, `confidence` and
/// `logits`; the confidence check sets `route`; the fallback node may rewrite `prediction`
/// and sets `corrected` / `correction_source`. Every node appends to `events`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationState {
    pub text: String,
    pub prediction: Option<Sentiment>,
    pub confidence: f32,
    pub logits: Vec<f32>,
    pub route: Option<Route>,
    pub corrected: bool,
    pub correction_source: Option<String>,
    pub events: Vec<String>,
}

impl ClassificationState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
