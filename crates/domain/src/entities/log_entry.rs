//! One processed turn, as written to the output log.

use serde::{Deserialize, Serialize};

use crate::entities::TimedMessage;
use crate::ids::PlayerId;
use crate::types::{Mood, MoodIntensity};
use crate::value_objects::MoodAssessment;

/// Record of a single replayed message and the NPC's answer.
///
/// Serializes to the flat object written one-per-line to the log. The
/// refinement keys are omitted when the classifier did not produce them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub player_id: PlayerId,
    pub message: String,
    pub npc_reply: String,
    /// History handed to the reply generator, current message included
    pub history_used: Vec<String>,
    pub npc_mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_intensity: Option<MoodIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_reason: Option<String>,
    /// Session mood before this turn was classified
    pub previous_mood: Mood,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(
        message: &TimedMessage,
        npc_reply: String,
        history_used: Vec<String>,
        assessment: MoodAssessment,
        previous_mood: Mood,
    ) -> Self {
        Self {
            player_id: message.player_id.clone(),
            message: message.text.clone(),
            npc_reply,
            history_used,
            npc_mood: assessment.mood,
            mood_intensity: assessment.intensity,
            mood_reason: assessment.reason,
            previous_mood,
            timestamp: message.timestamp.clone(),
        }
    }
}
