//! Debate state, participants and utterances.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::MAX_ROUNDS;

/// Debate participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Speaker {
    Scientist,
    Philosopher,
}

impl Speaker {
    pub const ALL: [Speaker; 2] = [Speaker::Scientist, Speaker::Philosopher];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Scientist => "Scientist",
            Self::Philosopher => "Philosopher",
        }
    }

    pub fn opponent(&self) -> Speaker {
        match self {
            Self::Scientist => Self::Philosopher,
            Self::Philosopher => Self::Scientist,
        }
    }

    /// Exact participant name, as the judge must write it.
    pub fn from_name(name: &str) -> Option<Speaker> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Speaker on turn `turn_index`: even is Scientist, odd is Philosopher.
    pub fn for_turn(turn_index: usize) -> Speaker {
        if turn_index % 2 == 0 {
            Self::Scientist
        } else {
            Self::Philosopher
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One transcript entry. `turn` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub turn: usize,
    pub speaker: Speaker,
    pub text: String,
}

/// State flowing through the debate graph.
///
/// `transcript`, `used_arguments` and `events` only grow. `turn_index` and `round_number` are
/// advanced by the agent node alone; `memory_summary` and `agent_memory` are rewritten by the
/// memory node; the `final_*` fields are written once by the judge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DebateState {
    pub topic: String,
    pub turn_index: usize,
    pub round_number: usize,
    pub current_speaker: Speaker,
    pub transcript: Vec<Utterance>,
    pub memory_summary: String,
    pub agent_memory: BTreeMap<Speaker, String>,
    pub used_arguments: HashSet<String>,
    pub events: Vec<String>,
    pub final_summary: Option<String>,
    pub final_winner: Option<Speaker>,
    pub final_reason: Option<String>,
}

impl DebateState {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            turn_index: 0,
            round_number: 1,
            current_speaker: Speaker::Scientist,
            transcript: Vec::new(),
            memory_summary: String::new(),
            agent_memory: Speaker::ALL.into_iter().map(|s| (s, String::new())).collect(),
            used_arguments: HashSet::new(),
            events: Vec::new(),
            final_summary: None,
            final_winner: None,
            final_reason: None,
        }
    }

    /// Whose turn it is, derived from the turn counter.
    pub fn next_speaker(&self) -> Speaker {
        Speaker::for_turn(self.turn_index)
    }

    pub fn is_finished(&self) -> bool {
        self.round_number > MAX_ROUNDS
    }

    /// Memory view shown to `speaker`: its routed memory, or the global summary when empty.
    pub fn memory_view(&self, speaker: Speaker) -> &str {
        match self.agent_memory.get(&speaker) {
            Some(m) if !m.is_empty() => m,
            _ => &self.memory_summary,
        }
    }

    /// Transcript as `[Round n] Speaker: text` lines.
    pub fn transcript_text(&self) -> String {
        self.transcript
            .iter()
            .map(|u| format!("[Round {}] {}: {}", u.turn, u.speaker, u.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
