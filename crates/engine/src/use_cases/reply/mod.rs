//! NPC reply generation.

use std::sync::Arc;

use moodsim_domain::{Mood, PlayerId};

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest};
use crate::prompt_templates::{keys, PromptTemplates};
use crate::use_cases::mood::render_history;

/// Prefix of the text substituted for a reply the oracle could not produce
pub const FALLBACK_REPLY_PREFIX: &str = "(Fallback) NPC could not reply. Error:";

/// Sampling settings for reply calls.
#[derive(Debug, Clone)]
pub struct ReplyGeneratorConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ReplyGeneratorConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 150,
        }
    }
}

/// What the NPC says back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcReply {
    pub text: String,
    /// True when `text` is the substitute error string
    pub fallback: bool,
}

impl NpcReply {
    fn fallback(error: &LlmError) -> Self {
        Self {
            text: format!("{} {}", FALLBACK_REPLY_PREFIX, error),
            fallback: true,
        }
    }
}

/// Produces in-character replies conditioned on the player's mood.
pub struct ReplyGenerator {
    llm: Arc<dyn LlmPort>,
    prompts: Arc<PromptTemplates>,
    config: ReplyGeneratorConfig,
}

impl ReplyGenerator {
    pub fn new(llm: Arc<dyn LlmPort>, prompts: Arc<PromptTemplates>) -> Self {
        Self {
            llm,
            prompts,
            config: ReplyGeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplyGeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate the NPC's answer to `message`.
    ///
    /// `history` already ends with `message`. Never fails: an oracle error or
    /// an empty completion becomes a fallback reply carrying the error text.
    pub async fn generate(
        &self,
        player_id: &PlayerId,
        message: &str,
        history: &[String],
        mood: Mood,
    ) -> NpcReply {
        let request = LlmRequest::new(self.build_prompt(message, history, mood))
            .with_temperature(self.config.temperature)
            .with_max_tokens(Some(self.config.max_tokens));

        let result = self.llm.generate(request).await.and_then(|response| {
            let text = response.content.trim();
            if text.is_empty() {
                Err(LlmError::InvalidResponse("Empty reply".to_string()))
            } else {
                Ok(text.to_string())
            }
        });

        match result {
            Ok(text) => NpcReply {
                text,
                fallback: false,
            },
            Err(e) => {
                tracing::warn!(
                    player_id = %player_id,
                    error = %e,
                    "Reply generation failed, using fallback reply"
                );
                NpcReply::fallback(&e)
            }
        }
    }

    fn build_prompt(&self, message: &str, history: &[String], mood: Mood) -> String {
        format!(
            "{}\nThe player's mood toward you is: {}.\n{}\n\nConversation so far:\n{}\n\nThe player just said: \"{}\"\n{}\n\nNPC:",
            self.prompts.get(keys::REPLY_ROLE),
            mood,
            self.prompts.style_for(mood),
            render_history(history),
            message,
            self.prompts.get(keys::REPLY_GUIDELINES),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmResponse, MockLlmPort};

    fn generator_with(llm: MockLlmPort) -> ReplyGenerator {
        ReplyGenerator::new(Arc::new(llm), Arc::new(PromptTemplates::defaults()))
    }

    fn history(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok(LlmResponse::text("  Welcome, traveler!\n")));

        let reply = generator_with(llm)
            .generate(&PlayerId::new("p1"), "hello", &history(&["hello"]), Mood::Friendly)
            .await;

        assert_eq!(reply.text, "Welcome, traveler!");
        assert!(!reply.fallback);
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback_text() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Err(LlmError::RequestFailed("connection refused".into())));

        let reply = generator_with(llm)
            .generate(&PlayerId::new("p1"), "hello", &history(&["hello"]), Mood::Neutral)
            .await;

        assert!(reply.fallback);
        assert_eq!(
            reply.text,
            "(Fallback) NPC could not reply. Error: LLM request failed: connection refused"
        );
    }

    #[tokio::test]
    async fn test_empty_completion_is_a_failure() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok(LlmResponse::text("   ")));

        let reply = generator_with(llm)
            .generate(&PlayerId::new("p1"), "hello", &history(&["hello"]), Mood::Neutral)
            .await;

        assert!(reply.fallback);
        assert!(reply.text.starts_with(FALLBACK_REPLY_PREFIX));
    }

    #[tokio::test]
    async fn test_request_settings() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|request: &LlmRequest| {
                request.temperature == Some(1.0)
                    && request.max_tokens == Some(150)
                    && request.prompt.ends_with("NPC:")
            })
            .times(1)
            .returning(|_| Ok(LlmResponse::text("Hmph.")));

        let reply = generator_with(llm)
            .generate(&PlayerId::new("p1"), "hi", &history(&["hi"]), Mood::Angry)
            .await;
        assert_eq!(reply.text, "Hmph.");
    }

    #[test]
    fn test_prompt_carries_mood_style_and_history() {
        let generator = generator_with(MockLlmPort::new());

        let prompt = generator.build_prompt(
            "And you?",
            &history(&["Hi there", "Nice sword", "And you?"]),
            Mood::Angry,
        );

        assert!(prompt.contains("mood toward you is: angry"));
        assert!(prompt.contains("Be curt and hostile"));
        let first = prompt.find("Player: Hi there").unwrap();
        let last = prompt.find("Player: And you?").unwrap();
        assert!(first < last);
        assert!(prompt.contains("The player just said: \"And you?\""));
        assert!(prompt.contains("short, immersive, and in character"));
        assert!(prompt.ends_with("NPC:"));
    }

    #[test]
    fn test_unmapped_style_yields_empty_directive() {
        let generator = ReplyGenerator::new(
            Arc::new(MockLlmPort::new()),
            Arc::new(PromptTemplates::defaults().without(keys::STYLE_FRIENDLY)),
        );

        let prompt = generator.build_prompt("hello", &history(&["hello"]), Mood::Friendly);
        assert!(prompt.contains("mood toward you is: friendly"));
        assert!(!prompt.contains("warmly"));
    }
}
