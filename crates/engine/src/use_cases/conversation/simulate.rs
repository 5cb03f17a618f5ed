//! Simulate conversation use case.
//!
//! Replays the whole message log in timestamp order. Each message runs
//! through the same per-player steps: classify against the prior history,
//! record the mood, append the message, generate a reply, record the turn.

use std::sync::Arc;

use moodsim_domain::{replay_order, DomainError, LogEntry, Mood, TimedMessage};

use crate::infrastructure::ports::{IoError, LogSinkPort, MessageSourcePort, ProgressPort};
use crate::stores::SessionStore;
use crate::use_cases::mood::MoodClassifier;
use crate::use_cases::reply::ReplyGenerator;

/// Outcome of one complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    /// One entry per input message, in processing order
    pub entries: Vec<LogEntry>,
    /// Distinct players seen
    pub players: usize,
    /// Turns whose mood is the carried-over default
    pub classification_fallbacks: usize,
    /// Turns whose reply is the substitute error text
    pub reply_fallbacks: usize,
}

impl SimulationReport {
    pub fn turns(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Failed to load messages: {0}")]
    Load(#[source] IoError),
    #[error("Invalid input: {0}")]
    InvalidInput(#[source] DomainError),
    #[error("Invalid simulation settings: {0}")]
    InvalidSettings(#[source] DomainError),
    #[error("Failed to write log: {0}")]
    Write(#[source] IoError),
}

/// Simulate conversation use case.
///
/// Orchestrates: message loading, replay ordering, per-player session state,
/// mood classification, reply generation, log and progress output.
pub struct SimulateConversation {
    classifier: Arc<MoodClassifier>,
    generator: Arc<ReplyGenerator>,
    source: Arc<dyn MessageSourcePort>,
    sink: Arc<dyn LogSinkPort>,
    progress: Arc<dyn ProgressPort>,
    history_capacity: usize,
    initial_mood: Mood,
}

impl SimulateConversation {
    pub fn new(
        classifier: Arc<MoodClassifier>,
        generator: Arc<ReplyGenerator>,
        source: Arc<dyn MessageSourcePort>,
        sink: Arc<dyn LogSinkPort>,
        progress: Arc<dyn ProgressPort>,
    ) -> Self {
        Self {
            classifier,
            generator,
            source,
            sink,
            progress,
            history_capacity: moodsim_domain::HistoryBuffer::DEFAULT_CAPACITY,
            initial_mood: Mood::default(),
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_initial_mood(mut self, mood: Mood) -> Self {
        self.initial_mood = mood;
        self
    }

    /// Run one simulation from input to written log.
    ///
    /// # Returns
    /// * `Ok(SimulationReport)` - Every message processed and the log written
    /// * `Err(SimulationError)` - Input could not be loaded or validated, or
    ///   the log could not be written. Input errors abort before any oracle call.
    pub async fn execute(&self) -> Result<SimulationReport, SimulationError> {
        let mut sessions = SessionStore::new(self.history_capacity, self.initial_mood)
            .map_err(SimulationError::InvalidSettings)?;

        let raw = self.source.load().await.map_err(SimulationError::Load)?;
        let messages = replay_order(raw).map_err(SimulationError::InvalidInput)?;

        tracing::info!(
            messages = messages.len(),
            mode = %self.classifier.mode(),
            "Starting conversation simulation"
        );

        let mut report = SimulationReport {
            entries: Vec::with_capacity(messages.len()),
            players: 0,
            classification_fallbacks: 0,
            reply_fallbacks: 0,
        };

        for message in &messages {
            let (entry, classification_fell_back, reply_fell_back) =
                self.process_turn(&mut sessions, message).await;

            if classification_fell_back {
                report.classification_fallbacks += 1;
            }
            if reply_fell_back {
                report.reply_fallbacks += 1;
            }

            self.progress.turn_completed(&entry);
            report.entries.push(entry);
        }
        report.players = sessions.len();

        self.sink
            .write_entries(&report.entries)
            .await
            .map_err(SimulationError::Write)?;

        tracing::info!(
            turns = report.turns(),
            players = report.players,
            classification_fallbacks = report.classification_fallbacks,
            reply_fallbacks = report.reply_fallbacks,
            "Conversation simulation complete"
        );

        Ok(report)
    }

    async fn process_turn(
        &self,
        sessions: &mut SessionStore,
        message: &TimedMessage,
    ) -> (LogEntry, bool, bool) {
        let player_id = &message.player_id;

        let session = sessions.get_or_create(player_id);
        let previous_history = session.history().snapshot();
        let previous_mood = session.mood();

        let assessment = self
            .classifier
            .classify(&previous_history, &message.text, previous_mood)
            .await;
        let classification_fell_back = assessment.fallback;

        sessions.record_mood(player_id, assessment.mood);
        let session = sessions.append_history(player_id, message.text.as_str());
        let history_used = session.history().snapshot();

        tracing::debug!(
            player_id = %player_id,
            turn = session.turns(),
            previous_mood = %previous_mood,
            mood = %assessment.mood,
            "Mood updated"
        );

        let reply = self
            .generator
            .generate(player_id, &message.text, &history_used, assessment.mood)
            .await;

        let entry = LogEntry::new(message, reply.text, history_used, assessment, previous_mood);
        (entry, classification_fell_back, reply.fallback)
    }
}
