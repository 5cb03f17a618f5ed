//! Player messages as read from the input log, and their replay order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::parse_timestamp;
use crate::error::DomainError;
use crate::ids::PlayerId;

/// One utterance as it appears in the input array.
///
/// All three fields are required; the timestamp is kept as the original
/// string so it can be echoed back unchanged in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMessage {
    pub player_id: PlayerId,
    pub text: String,
    pub timestamp: String,
}

impl PlayerMessage {
    pub fn new(
        player_id: impl Into<PlayerId>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Parse the timestamp, remembering where this message sat in the input.
    pub fn into_timed(self, sequence: usize) -> Result<TimedMessage, DomainError> {
        let at = parse_timestamp(&self.timestamp).map_err(|e| {
            DomainError::parse(format!(
                "message #{} from player '{}': {}",
                sequence, self.player_id, e
            ))
        })?;

        Ok(TimedMessage {
            player_id: self.player_id,
            text: self.text,
            timestamp: self.timestamp,
            at,
            sequence,
        })
    }
}

/// A message whose timestamp has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedMessage {
    pub player_id: PlayerId,
    pub text: String,
    /// Original timestamp string
    pub timestamp: String,
    /// Parsed instant, the replay ordering key
    pub at: DateTime<Utc>,
    /// Position in the input, breaks timestamp ties
    pub sequence: usize,
}

/// Validate every timestamp and sort messages into replay order.
///
/// Order is ascending by instant; messages sharing an instant keep their
/// input order. All timestamps are checked before anything is returned, so a
/// single malformed value rejects the whole batch.
pub fn replay_order(messages: Vec<PlayerMessage>) -> Result<Vec<TimedMessage>, DomainError> {
    let mut timed = messages
        .into_iter()
        .enumerate()
        .map(|(sequence, message)| message.into_timed(sequence))
        .collect::<Result<Vec<_>, _>>()?;

    timed.sort_by_key(|message| (message.at, message.sequence));
    Ok(timed)
}
