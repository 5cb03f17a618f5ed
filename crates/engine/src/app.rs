//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    chat_completions::ChatCompletionsClient,
    config::AppConfig,
    log_sink::JsonLinesLogSink,
    message_source::JsonFileMessageSource,
    ports::{LlmPort, LogSinkPort, MessageSourcePort, ProgressPort},
    progress::ConsoleProgress,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the use cases wired against one configuration.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub conversation: use_cases::ConversationUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: &AppConfig,
        llm: Arc<dyn LlmPort>,
        source: Arc<dyn MessageSourcePort>,
        sink: Arc<dyn LogSinkPort>,
        progress: Arc<dyn ProgressPort>,
    ) -> Self {
        let prompts = Arc::new(config.prompts.clone());

        let mood = Arc::new(
            use_cases::MoodClassifier::new(llm.clone(), prompts.clone())
                .with_config(config.classifier.clone()),
        );
        let reply = Arc::new(
            use_cases::ReplyGenerator::new(llm, prompts)
                .with_config(config.generator.clone()),
        );

        let simulate = Arc::new(
            use_cases::SimulateConversation::new(mood, reply, source, sink, progress)
                .with_history_capacity(config.simulation.history_capacity)
                .with_initial_mood(config.simulation.default_mood),
        );

        Self {
            use_cases: UseCases {
                conversation: use_cases::ConversationUseCases::new(simulate),
            },
        }
    }

    /// Wire the production adapters: chat-completions client, JSON input
    /// file, JSON-lines log and console progress.
    pub fn from_config(config: &AppConfig) -> Self {
        tracing::info!(
            base_url = %config.llm.base_url,
            model = %config.llm.model,
            timeout_secs = config.llm.timeout_secs,
            "LLM client configured"
        );
        let llm: Arc<dyn LlmPort> = Arc::new(ChatCompletionsClient::with_timeout(
            &config.llm.base_url,
            &config.llm.model,
            config.llm.api_key.clone(),
            config.llm.timeout_secs,
        ));

        Self::new(
            config,
            llm,
            Arc::new(JsonFileMessageSource::new(&config.simulation.input_path)),
            Arc::new(JsonLinesLogSink::new(&config.simulation.output_path)),
            Arc::new(ConsoleProgress::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{RecordingProgress, ScriptedLlm};
    use moodsim_domain::{LogEntry, Mood};

    fn test_config(dir: &std::path::Path) -> AppConfig {
        let input = dir.join("players.json");
        let output = dir.join("npc_log.txt");
        AppConfig::from_lookup(move |key| match key {
            "LLM_BASE_URL" => Some("http://localhost:11434/v1".to_string()),
            "MOODSIM_INPUT" => Some(input.display().to_string()),
            "MOODSIM_OUTPUT" => Some(output.display().to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_file_to_file_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(
            &config.simulation.input_path,
            r#"[
                {"player_id": "p2", "text": "You call this ale?", "timestamp": "2024-01-01T00:01:00Z"},
                {"player_id": "p1", "text": "hello", "timestamp": "2024-01-01T00:00:00"}
            ]"#,
        )
        .unwrap();

        let llm = ScriptedLlm::new()
            .classify_as(r#"{"mood": "friendly", "intensity": "mild", "reason": "greeting"}"#)
            .reply_with("Welcome, traveler!")
            .classify_as(r#"{"mood": "angry", "intensity": "moderate", "reason": "complains"}"#)
            .reply_with("Drink it or leave.");
        let progress = Arc::new(RecordingProgress::new());

        let app = App::new(
            &config,
            Arc::new(llm),
            Arc::new(JsonFileMessageSource::new(&config.simulation.input_path)),
            Arc::new(JsonLinesLogSink::new(&config.simulation.output_path)),
            progress.clone(),
        );

        let report = app.use_cases.conversation.simulate.execute().await.unwrap();
        assert_eq!(report.turns(), 2);
        assert_eq!(progress.turns().len(), 2);

        let written = std::fs::read_to_string(&config.simulation.output_path).unwrap();
        let entries: Vec<LogEntry> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(entries, report.entries);
        assert_eq!(entries[0].player_id.as_str(), "p1");
        assert_eq!(entries[0].npc_mood, Mood::Friendly);
        assert_eq!(entries[0].npc_reply, "Welcome, traveler!");
        assert_eq!(entries[1].player_id.as_str(), "p2");
        assert_eq!(entries[1].npc_mood, Mood::Angry);
        assert_eq!(entries[1].timestamp, "2024-01-01T00:01:00Z");
    }

    #[tokio::test]
    async fn test_missing_input_leaves_no_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let app = App::new(
            &config,
            Arc::new(ScriptedLlm::new()),
            Arc::new(JsonFileMessageSource::new(&config.simulation.input_path)),
            Arc::new(JsonLinesLogSink::new(&config.simulation.output_path)),
            Arc::new(RecordingProgress::new()),
        );

        assert!(app.use_cases.conversation.simulate.execute().await.is_err());
        assert!(!config.simulation.output_path.exists());
    }
}
