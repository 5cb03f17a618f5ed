//! Per-player conversational state.

use crate::ids::PlayerId;
use crate::types::Mood;
use crate::value_objects::HistoryBuffer;

/// What the NPC remembers about one player during a run.
///
/// Created on the player's first message, mutated once per message for that
/// player, dropped when the run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSession {
    player_id: PlayerId,
    history: HistoryBuffer,
    mood: Mood,
    turns: usize,
}

impl PlayerSession {
    /// Start a session with an empty copy of `history` and the given mood.
    pub fn new(player_id: PlayerId, mut history: HistoryBuffer, initial_mood: Mood) -> Self {
        history.clear();
        Self {
            player_id,
            history,
            mood: initial_mood,
            turns: 0,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Number of utterances recorded so far, evicted ones included
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Overwrite the current mood, returning the one it replaced.
    pub fn record_mood(&mut self, mood: Mood) -> Mood {
        std::mem::replace(&mut self.mood, mood)
    }

    /// Push an utterance, evicting the oldest one when full.
    pub fn append_history(&mut self, text: impl Into<String>) -> Option<String> {
        self.turns += 1;
        self.history.push(text)
    }
}
