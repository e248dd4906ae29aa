//! Personas and prompt builders for the debate.

use super::{DebateState, Speaker, Utterance};

/// Appended to the agent prompt when the first answer repeated an earlier argument.
pub const AVOID_REPETITION: &str = "\nAvoid repeating previous arguments explicitly.";
/// Appended to the agent prompt when the answer was incoherent.
pub const ENSURE_COHERENCE: &str = "\nEnsure coherence and substantive content.";

/// Judge instructions.
pub const JUDGE_SYSTEM: &str = "You are a neutral Judge. Review the full debate. Provide: \
1) A concise summary (<= 6 sentences) capturing key points from both sides. \
2) A verdict: Winner must be exactly 'Scientist' or 'Philosopher'. \
3) A brief justification (<= 2 sentences) linked to logical coherence and support.";

/// A participant's system preamble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Persona {
    pub speaker: Speaker,
    pub system_preamble: &'static str,
}

pub const SCIENTIST: Persona = Persona {
    speaker: Speaker::Scientist,
    system_preamble: "You are a pragmatic Scientist. Argue with evidence, risk analysis, and \
empirical reasoning. Keep claims testable. Avoid repetition. Reply in 1–2 short sentences \
(<= 40 words).",
};

pub const PHILOSOPHER: Persona = Persona {
    speaker: Speaker::Philosopher,
    system_preamble: "You are a thoughtful Philosopher. Argue with principles, ethics, and \
historical reasoning. Explore trade-offs, autonomy, and societal evolution. Avoid repetition. \
Reply in 1–2 short sentences (<= 40 words).",
};

pub fn persona_for(speaker: Speaker) -> &'static Persona {
    match speaker {
        Speaker::Scientist => &SCIENTIST,
        Speaker::Philosopher => &PHILOSOPHER,
    }
}

/// Agent prompt; `turn` is the 1-based turn number.
pub fn build_agent_prompt(persona: &Persona, topic: &str, turn: usize, memory: &str) -> String {
    format!(
        "System: {}\n\
         Debate Topic: {}\n\
         Your Turn: {} (turn {})\n\
         Relevant Memory So Far:\n{}\n\
         Instruction: Present a new argument (no repetition), logically coherent with the debate so far. \
         Output MUST be 1–2 sentences, max ~40 words. \
         This is a harmless academic debate; avoid any unsafe content.",
        persona.system_preamble, topic, persona.speaker, turn, memory
    )
}

/// Judge prompt. The trailing format block is what the verdict parser expects.
pub fn build_judge_prompt(topic: &str, memory_summary: &str, transcript: &str) -> String {
    format!(
        "System: {}\n\
         Debate Topic: {}\n\
         Memory Summary:\n{}\n\n\
         Full Transcript:\n{}\n\n\
         Output format (strict):\n\
         Summary: <<=6 sentences>\nWinner: <Scientist|Philosopher>\nReason: <<=2 sentences>",
        JUDGE_SYSTEM, topic, memory_summary, transcript
    )
}

/// Global transcript summary prompt.
pub fn build_summary_prompt(transcript: &str) -> String {
    format!(
        "Summarize the debate transcript in 4–6 concise sentences, focusing only on new points per round.\n\
         Transcript:\n{}",
        transcript
    )
}

/// Per-speaker memory prompt: bullets of the opponent's last (at most 2) utterances.
pub fn build_memory_route_prompt(state: &DebateState, speaker: Speaker) -> String {
    let opponent = speaker.opponent();
    let recent: Vec<&Utterance> = state
        .transcript
        .iter()
        .filter(|u| u.speaker == opponent)
        .collect();
    let snippets = recent[recent.len().saturating_sub(2)..]
        .iter()
        .map(|u| format!("{}: {}", u.speaker, u.text))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Extract opponent's last 1–2 distinct points as max 4 bullets. \
         Keep bullets <= 12 words each; avoid repetition.\n\
         Opponent: {}\n\
         Transcript:\n{}\n\
         Recent opponent snippets:\n{}",
        opponent,
        state.transcript_text(),
        snippets
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{JUDGE_FORMAT_MARKER, MEMORY_ROUTE_MARKER, SUMMARY_MARKER};

    #[test]
    fn agent_prompt_carries_persona_turn_and_memory() {
        let p = build_agent_prompt(&PHILOSOPHER, "AI rules", 2, "- opponent said data");
        assert!(p.starts_with("System: You are a thoughtful Philosopher."));
        assert!(p.contains("Debate Topic: AI rules\n"));
        assert!(p.contains("Your Turn: Philosopher (turn 2)\n"));
        assert!(p.contains("Relevant Memory So Far:\n- opponent said data\n"));
    }

    #[test]
    fn prompts_carry_mock_markers() {
        assert!(build_judge_prompt("t", "m", "x").contains(JUDGE_FORMAT_MARKER));
        assert!(build_summary_prompt("x").contains(SUMMARY_MARKER));
        let state = DebateState::new("t");
        assert!(build_memory_route_prompt(&state, Speaker::Scientist).contains(MEMORY_ROUTE_MARKER));
    }

    #[test]
    fn memory_route_prompt_keeps_last_two_opponent_turns() {
        let mut state = DebateState::new("t");
        for (i, text) in ["s1", "p1", "s2", "p2", "s3", "p3"].iter().enumerate() {
            state.transcript.push(Utterance {
                turn: i + 1,
                speaker: Speaker::for_turn(i),
                text: text.to_string(),
            });
        }
        let p = build_memory_route_prompt(&state, Speaker::Scientist);
        assert!(p.contains("Opponent: Philosopher\n"));
        assert!(p.ends_with("Recent opponent snippets:\nPhilosopher: p2\nPhilosopher: p3"));
    }

    #[test]
    fn persona_lookup() {
        assert_eq!(persona_for(Speaker::Scientist).speaker, Speaker::Scientist);
        assert!(persona_for(Speaker::Philosopher)
            .system_preamble
            .contains("Philosopher"));
    }
}
