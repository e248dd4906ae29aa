//! Pure validators for generated turns. None of them mutate state.

use super::{DebateState, Speaker, MIN_COHERENT_LEN};

/// `Ok(())` or a diagnostic message.
pub type Validation = Result<(), String>;

/// Normal form used for the dedup set: trimmed and lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Fails when `speaker` is not the speaker derived from the turn counter.
pub fn validate_turn(state: &DebateState, speaker: Speaker) -> Validation {
    let expected = state.next_speaker();
    if speaker != expected {
        return Err(format!(
            "Turn violation: expected {}, got {}",
            expected, speaker
        ));
    }
    Ok(())
}

/// Fails when the normalized text was already used in this debate.
pub fn validate_repetition(state: &DebateState, text: &str) -> Validation {
    if state.used_arguments.contains(&normalize(text)) {
        return Err("Repetition detected: argument already used.".to_string());
    }
    Ok(())
}

/// Fails when the text is shorter than [`MIN_COHERENT_LEN`] characters after trimming, or
/// equals `prev` ignoring case and surrounding whitespace.
pub fn validate_coherence(prev: &str, text: &str) -> Validation {
    if text.trim().chars().count() < MIN_COHERENT_LEN {
        return Err("Incoherent: response too short or empty.".to_string());
    }
    if normalize(text) == normalize(prev) {
        return Err("Incoherent: identical to previous utterance.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_validator_checks_parity() {
        let mut state = DebateState::new("t");
        assert!(validate_turn(&state, Speaker::Scientist).is_ok());
        assert_eq!(
            validate_turn(&state, Speaker::Philosopher).unwrap_err(),
            "Turn violation: expected Scientist, got Philosopher"
        );
        state.turn_index = 3;
        assert!(validate_turn(&state, Speaker::Philosopher).is_ok());
        assert!(validate_turn(&state, Speaker::Scientist).is_err());
    }

    /// **Scenario**: Repetition fails iff the normalized text is in the dedup set.
    #[test]
    fn repetition_uses_normalized_membership() {
        let mut state = DebateState::new("t");
        state.used_arguments.insert(normalize("  Regulation saves lives. "));
        assert!(validate_repetition(&state, "regulation saves lives.").is_err());
        assert!(validate_repetition(&state, "REGULATION SAVES LIVES.\n").is_err());
        assert!(validate_repetition(&state, "Regulation saves lives!").is_ok());
    }

    #[test]
    fn coherence_rejects_short_text() {
        assert!(validate_coherence("", "").is_err());
        assert!(validate_coherence("", "   short   ").is_err());
        assert!(validate_coherence("", "123456789").is_err());
        assert!(validate_coherence("", "1234567890").is_ok());
    }

    #[test]
    fn coherence_rejects_case_insensitive_duplicate_of_previous() {
        let prev = "Evidence must guide policy.";
        assert_eq!(
            validate_coherence(prev, "  evidence MUST guide policy. ").unwrap_err(),
            "Incoherent: identical to previous utterance."
        );
        assert!(validate_coherence(prev, "Principles must guide policy.").is_ok());
    }
}
