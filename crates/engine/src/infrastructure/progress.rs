//! Console progress output.

use moodsim_domain::LogEntry;

use crate::infrastructure::ports::ProgressPort;

/// Prints a readable block per processed turn to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }
}

/// Format one turn as printed on the console.
pub fn format_turn(entry: &LogEntry) -> String {
    let intensity = entry
        .mood_intensity
        .map(|i| format!(" | intensity={}", i))
        .unwrap_or_default();

    format!(
        "[player_id={} | mood={}{} | time={}]\nPlayer: {}\nNPC: {}\nContext: {:?}\n---",
        entry.player_id,
        entry.npc_mood,
        intensity,
        entry.timestamp,
        entry.message,
        entry.npc_reply,
        entry.history_used
    )
}

impl ProgressPort for ConsoleProgress {
    fn turn_completed(&self, entry: &LogEntry) {
        tracing::debug!(
            player_id = %entry.player_id,
            mood = %entry.npc_mood,
            previous_mood = %entry.previous_mood,
            timestamp = %entry.timestamp,
            "Turn completed"
        );
        println!("{}", format_turn(entry));
    }
}
