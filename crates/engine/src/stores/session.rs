//! Per-player session storage for one run.

use std::collections::HashMap;

use moodsim_domain::{DomainError, HistoryBuffer, Mood, PlayerId, PlayerSession};

/// Owns every player's session while a simulation runs.
///
/// Single owner, no locking: the conversation driver holds it by `&mut`.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<PlayerId, PlayerSession>,
    template: HistoryBuffer,
    initial_mood: Mood,
}

impl SessionStore {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `history_capacity` is zero.
    pub fn new(history_capacity: usize, initial_mood: Mood) -> Result<Self, DomainError> {
        Ok(Self {
            sessions: HashMap::new(),
            template: HistoryBuffer::new(history_capacity)?,
            initial_mood,
        })
    }

    /// Existing session for `player_id`, or a fresh one with empty history.
    pub fn get_or_create(&mut self, player_id: &PlayerId) -> &mut PlayerSession {
        let template = &self.template;
        let initial_mood = self.initial_mood;
        self.sessions.entry(player_id.clone()).or_insert_with(|| {
            tracing::debug!(player_id = %player_id, "Created player session");
            PlayerSession::new(player_id.clone(), template.clone(), initial_mood)
        })
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&PlayerSession> {
        self.sessions.get(player_id)
    }

    /// Overwrite a player's mood, returning the previous one.
    pub fn record_mood(&mut self, player_id: &PlayerId, mood: Mood) -> Mood {
        self.get_or_create(player_id).record_mood(mood)
    }

    /// Append an utterance to a player's bounded history and return the
    /// updated session.
    pub fn append_history(
        &mut self,
        player_id: &PlayerId,
        text: impl Into<String>,
    ) -> &PlayerSession {
        let session = self.get_or_create(player_id);
        if let Some(evicted) = session.append_history(text) {
            tracing::trace!(player_id = %player_id, evicted = %evicted, "History full, dropped oldest");
        }
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
