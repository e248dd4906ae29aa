//! Normalized response contract between backends and the retry policy.

/// What a backend returns for one call.
///
/// `text` is a direct accessor when the wire format has one; `candidates` holds each
/// candidate's content parts in order. [`into_text`](Self::into_text) is the only way the
/// policy reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerateResponse {
    pub text: Option<String>,
    pub candidates: Vec<Vec<String>>,
}

impl GenerateResponse {
    /// Response carrying only direct text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            candidates: Vec::new(),
        }
    }

    /// Response carrying one candidate with the given parts.
    pub fn from_parts<I, T>(parts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            text: None,
            candidates: vec![parts.into_iter().map(Into::into).collect()],
        }
    }

    /// Trimmed direct text when non-empty; otherwise every non-blank part of every candidate,
    /// trimmed and joined with newlines. Empty string means "no text".
    pub fn into_text(self) -> String {
        if let Some(text) = self.text {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
        self.candidates
            .iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
