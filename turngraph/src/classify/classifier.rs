//! Sentiment classifier collaborator and the lexicon-based implementation.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::Sentiment;

/// File name looked up in a lexicon directory.
pub const LEXICON_FILE: &str = "lexicon.json";

/// Largest absolute weight a loaded lexicon may carry.
pub const MAX_WEIGHT: f32 = 100.0;

/// Summed scores are clamped to `[-MAX_SCORE, MAX_SCORE]` so the softmax stays finite.
const MAX_SCORE: f32 = 80.0;

/// Classifier load or run failure.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Model directory or file is missing or unreadable.
    #[error("classifier resource unavailable at {}: {reason}", .path.display())]
    ResourceUnavailable { path: PathBuf, reason: String },

    /// Lexicon file parsed but is unusable.
    #[error("invalid lexicon: {0}")]
    InvalidLexicon(String),
}

/// Result of one classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub label: Sentiment,
    /// Probability of `label`, in `[0, 1]`.
    pub confidence: f32,
    /// Raw scores in [`Sentiment::LABELS`] order.
    pub logits: Vec<f32>,
}

/// Sentiment classifier used by the inference node.
pub trait Classifier: Send + Sync {
    /// Classifies `text`, considering at most `max_length` tokens.
    fn classify(&self, text: &str, max_length: usize) -> Result<Classification, ClassifierError>;
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    weights: HashMap<String, f32>,
    #[serde(default)]
    negations: Vec<String>,
}

const BUILTIN_WEIGHTS: &[(&str, f32)] = &[
    ("good", 1.5),
    ("great", 2.0),
    ("excellent", 2.5),
    ("amazing", 2.5),
    ("wonderful", 2.5),
    ("love", 2.0),
    ("loved", 2.0),
    ("enjoyed", 1.5),
    ("fun", 1.0),
    ("best", 2.0),
    ("brilliant", 2.5),
    ("fantastic", 2.5),
    ("like", 0.8),
    ("nice", 1.0),
    ("recommend", 1.5),
    ("masterpiece", 3.0),
    ("bad", -1.5),
    ("terrible", -2.5),
    ("awful", -2.5),
    ("horrible", -2.5),
    ("worst", -3.0),
    ("boring", -2.0),
    ("hate", -2.0),
    ("hated", -2.0),
    ("poor", -1.5),
    ("waste", -2.0),
    ("disappointing", -2.0),
    ("dull", -1.5),
    ("mess", -1.5),
    ("bland", -1.0),
    ("annoying", -1.5),
    ("overrated", -1.5),
];

const BUILTIN_NEGATIONS: &[&str] = &["not", "no", "never", "don't", "didn't", "isn't", "wasn't", "hardly"];

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"[a-z0-9]+(?:'[a-z]+)?").expect("valid regex"))
}

/// Word-weight sentiment classifier.
///
/// Tokens are lowercase words; only the first `max_length` count. A negation word flips the
/// sign of the next scored word. The summed score `s`, clamped to a finite range, becomes
/// the logits `[-s/2, s/2]`, so the positive probability is `sigmoid(s)`. A tie goes to the
/// first label.
#[derive(Clone, Debug)]
pub struct LexiconClassifier {
    weights: HashMap<String, f32>,
    negations: HashSet<String>,
}

impl LexiconClassifier {
    /// Classifier with the bundled English lexicon.
    pub fn builtin() -> Self {
        Self {
            weights: BUILTIN_WEIGHTS
                .iter()
                .map(|(w, s)| (w.to_string(), *s))
                .collect(),
            negations: BUILTIN_NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Loads `lexicon.json` from `dir`.
    ///
    /// # Errors
    ///
    /// `ResourceUnavailable` when the directory or file is missing or unreadable,
    /// `InvalidLexicon` when the JSON does not parse, has no weights, or a weight is not a
    /// finite number within [`MAX_WEIGHT`].
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ClassifierError::ResourceUnavailable {
                path: dir.to_path_buf(),
                reason: "directory not found".to_string(),
            });
        }
        let path = dir.join(LEXICON_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|e| ClassifierError::ResourceUnavailable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let file: LexiconFile = serde_json::from_str(&raw)
            .map_err(|e| ClassifierError::InvalidLexicon(format!("{}: {}", path.display(), e)))?;
        if file.weights.is_empty() {
            return Err(ClassifierError::InvalidLexicon(format!(
                "{}: no weights",
                path.display()
            )));
        }
        if let Some((word, weight)) = file
            .weights
            .iter()
            .find(|(_, w)| !w.is_finite() || w.abs() > MAX_WEIGHT)
        {
            return Err(ClassifierError::InvalidLexicon(format!(
                "{}: weight {} for {:?} is outside [-{}, {}]",
                path.display(),
                weight,
                word,
                MAX_WEIGHT,
                MAX_WEIGHT
            )));
        }
        Ok(Self {
            weights: file
                .weights
                .into_iter()
                .map(|(w, s)| (w.to_lowercase(), s))
                .collect(),
            negations: file.negations.into_iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    fn score(&self, text: &str, max_length: usize) -> f32 {
        let lower = text.to_lowercase();
        let mut score: f32 = 0.0;
        let mut negate = false;
        for token in token_pattern().find_iter(&lower).take(max_length) {
            let token = token.as_str();
            if self.negations.contains(token) {
                negate = true;
            } else if let Some(weight) = self.weights.get(token) {
                score += if negate { -weight } else { *weight };
                negate = false;
            }
        }
        score.clamp(-MAX_SCORE, MAX_SCORE)
    }
}

impl Classifier for LexiconClassifier {
    fn classify(&self, text: &str, max_length: usize) -> Result<Classification, ClassifierError> {
        let score = self.score(text, max_length);
        let logits = vec![-score / 2.0, score / 2.0];
        let probs = softmax(&logits);
        let (index, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, p)| if p > best.1 { (i, p) } else { best });
        Ok(Classification {
            label: Sentiment::LABELS[index],
            confidence,
            logits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        assert!((p.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!(p[2] > p[1] && p[1] > p[0]);
    }

    #[test]
    fn strong_positive_and_negative_text() {
        let c = LexiconClassifier::builtin();
        let pos = c.classify("An amazing, brilliant film. Loved it!", 256).unwrap();
        assert_eq!(pos.label, Sentiment::Positive);
        assert!(pos.confidence > 0.9, "{}", pos.confidence);
        let neg = c.classify("Terrible. The worst movie, a total waste.", 256).unwrap();
        assert_eq!(neg.label, Sentiment::Negative);
        assert!(neg.confidence > 0.9, "{}", neg.confidence);
        assert_eq!(neg.logits.len(), 2);
    }

    #[test]
    fn negation_flips_next_scored_word() {
        let c = LexiconClassifier::builtin();
        let out = c.classify("This was not a good film", 256).unwrap();
        assert_eq!(out.label, Sentiment::Negative);
    }

    #[test]
    fn neutral_text_is_a_coin_flip() {
        let c = LexiconClassifier::builtin();
        let out = c.classify("The film is two hours long.", 256).unwrap();
        assert_eq!(out.label, Sentiment::Negative);
        assert!((out.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tokens_beyond_max_length_are_ignored() {
        let c = LexiconClassifier::builtin();
        let out = c.classify("plain words then excellent", 3).unwrap();
        assert!((out.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn missing_dir_is_resource_unavailable() {
        let err = LexiconClassifier::from_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, ClassifierError::ResourceUnavailable { .. }), "{:?}", err);
    }

    #[test]
    fn from_dir_loads_lexicon_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LEXICON_FILE),
            r#"{"weights":{"Splendid":3.0,"meh":-1.0},"negations":["nope"]}"#,
        )
        .unwrap();
        let c = LexiconClassifier::from_dir(dir.path()).unwrap();
        assert_eq!(c.classify("splendid", 256).unwrap().label, Sentiment::Positive);
        assert_eq!(c.classify("nope splendid", 256).unwrap().label, Sentiment::Negative);
    }

    #[test]
    fn empty_dir_and_bad_json_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            LexiconClassifier::from_dir(dir.path()),
            Err(ClassifierError::ResourceUnavailable { .. })
        ));
        std::fs::write(dir.path().join(LEXICON_FILE), r#"{"weights":{}}"#).unwrap();
        assert!(matches!(
            LexiconClassifier::from_dir(dir.path()),
            Err(ClassifierError::InvalidLexicon(_))
        ));
    }

    /// **Scenario**: A huge or non-finite weight is rejected instead of yielding NaN confidence.
    #[test]
    fn out_of_range_weights_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        for raw in [r#"{"weights":{"wow":3.0e38}}"#, r#"{"weights":{"wow":-101}}"#] {
            std::fs::write(dir.path().join(LEXICON_FILE), raw).unwrap();
            let err = LexiconClassifier::from_dir(dir.path()).unwrap_err();
            assert!(matches!(err, ClassifierError::InvalidLexicon(_)), "{}: {:?}", raw, err);
            assert!(err.to_string().contains("wow"), "{}", err);
        }
    }

    /// **Scenario**: Many strong words saturate confidence at a finite value in [0, 1].
    #[test]
    fn saturated_score_keeps_confidence_finite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LEXICON_FILE), r#"{"weights":{"wow":100.0}}"#).unwrap();
        let c = LexiconClassifier::from_dir(dir.path()).unwrap();
        let text = vec!["wow"; 200].join(" ");
        let out = c.classify(&text, 256).unwrap();
        assert_eq!(out.label, Sentiment::Positive);
        assert!(out.confidence.is_finite() && (0.0..=1.0).contains(&out.confidence));
        assert!(out.logits.iter().all(|l| l.is_finite()), "{:?}", out.logits);
    }
}
