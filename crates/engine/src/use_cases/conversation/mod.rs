//! Conversation use cases.
//!
//! The simulation flow is:
//! 1. Load every player message and sort it into replay order
//! 2. Classify the player's mood from their previous messages
//! 3. Record the mood and append the message to the player's history
//! 4. Generate the NPC reply from the updated history and mood
//! 5. Emit the turn to the progress stream, then write the full log

use std::sync::Arc;

mod simulate;

pub use simulate::{SimulateConversation, SimulationError, SimulationReport};

/// Container for conversation use cases.
pub struct ConversationUseCases {
    pub simulate: Arc<SimulateConversation>,
}

impl ConversationUseCases {
    pub fn new(simulate: Arc<SimulateConversation>) -> Self {
        Self { simulate }
    }
}
