//! Configurable LLM prompt templates used by the engine.
//!
//! Every template has a hard-coded default and can be overridden through an
//! environment variable derived from its key (see [`key_to_env_var`]).

use std::collections::HashMap;

use moodsim_domain::Mood;

/// All prompt template keys as constants.
pub mod keys {
    // === Mood Classification ===
    /// Role of the tone classifier; the category list is appended from `Mood`.
    pub const CLASSIFICATION_INSTRUCTIONS: &str = "classification.instructions";
    /// Answer format when asking for a JSON object.
    pub const CLASSIFICATION_STRUCTURED_FORMAT: &str = "classification.structured_format";
    /// Answer format when asking for a single word.
    pub const CLASSIFICATION_BARE_WORD_FORMAT: &str = "classification.bare_word_format";

    // === Reply Generation ===
    /// Role of the NPC.
    pub const REPLY_ROLE: &str = "reply.role";
    /// Tone and length constraints for the NPC reply.
    pub const REPLY_GUIDELINES: &str = "reply.guidelines";

    // === Persona Styles ===
    pub const STYLE_FRIENDLY: &str = "style.friendly";
    pub const STYLE_ANGRY: &str = "style.angry";
    pub const STYLE_NEUTRAL: &str = "style.neutral";
}

/// Default values for all prompt templates.
pub mod defaults {
    pub const CLASSIFICATION_INSTRUCTIONS: &str = r#"You are analyzing the mood of a player talking to an NPC in a fantasy RPG.
Classify the player's overall tone towards the NPC, considering their last few messages."#;

    pub const CLASSIFICATION_STRUCTURED_FORMAT: &str = r#"Answer in the following JSON format only:
{
  "mood": "friendly" | "angry" | "neutral",
  "intensity": "mild" | "moderate" | "strong",
  "reason": "<brief phrase describing why>"
}"#;

    pub const CLASSIFICATION_BARE_WORD_FORMAT: &str =
        "Answer with exactly one word: friendly, angry, or neutral.";

    pub const REPLY_ROLE: &str = "You are an NPC in a fantasy RPG.";

    pub const REPLY_GUIDELINES: &str = "Keep responses short, immersive, and in character.";

    pub const STYLE_FRIENDLY: &str = "Speak warmly, with encouragement. Offer helpful tips.";
    pub const STYLE_ANGRY: &str = "Be curt and hostile. You may refuse to help or insult lightly.";
    pub const STYLE_NEUTRAL: &str = "Keep replies factual and minimal, without much emotion.";
}

/// Convert a template key to its environment variable name.
pub fn key_to_env_var(key: &str) -> String {
    format!("MOODSIM_PROMPT_{}", key.to_uppercase().replace('.', "_"))
}

/// Get the default value for a template key.
pub fn get_default(key: &str) -> Option<&'static str> {
    match key {
        keys::CLASSIFICATION_INSTRUCTIONS => Some(defaults::CLASSIFICATION_INSTRUCTIONS),
        keys::CLASSIFICATION_STRUCTURED_FORMAT => Some(defaults::CLASSIFICATION_STRUCTURED_FORMAT),
        keys::CLASSIFICATION_BARE_WORD_FORMAT => Some(defaults::CLASSIFICATION_BARE_WORD_FORMAT),
        keys::REPLY_ROLE => Some(defaults::REPLY_ROLE),
        keys::REPLY_GUIDELINES => Some(defaults::REPLY_GUIDELINES),
        keys::STYLE_FRIENDLY => Some(defaults::STYLE_FRIENDLY),
        keys::STYLE_ANGRY => Some(defaults::STYLE_ANGRY),
        keys::STYLE_NEUTRAL => Some(defaults::STYLE_NEUTRAL),
        _ => None,
    }
}

/// Get all known template keys.
pub fn all_keys() -> Vec<&'static str> {
    vec![
        keys::CLASSIFICATION_INSTRUCTIONS,
        keys::CLASSIFICATION_STRUCTURED_FORMAT,
        keys::CLASSIFICATION_BARE_WORD_FORMAT,
        keys::REPLY_ROLE,
        keys::REPLY_GUIDELINES,
        keys::STYLE_FRIENDLY,
        keys::STYLE_ANGRY,
        keys::STYLE_NEUTRAL,
    ]
}

/// Template key holding the persona style for a mood.
pub fn style_key(mood: Mood) -> &'static str {
    match mood {
        Mood::Friendly => keys::STYLE_FRIENDLY,
        Mood::Angry => keys::STYLE_ANGRY,
        Mood::Neutral => keys::STYLE_NEUTRAL,
    }
}

/// Resolved template values for one run.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    values: HashMap<&'static str, String>,
}

impl PromptTemplates {
    /// Built-in defaults only.
    pub fn defaults() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Resolve every key, preferring `lookup(env_var)` over the default.
    ///
    /// An override set to the empty string is kept as empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = all_keys()
            .into_iter()
            .filter_map(|key| {
                let value = lookup(&key_to_env_var(key))
                    .or_else(|| get_default(key).map(str::to_string))?;
                Some((key, value))
            })
            .collect();

        Self { values }
    }

    /// Drop a template entirely, so lookups fall back to empty.
    pub fn without(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }

    /// Resolved template for `key`, or `""` if nothing is mapped.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Persona style directive for a mood; empty when unmapped.
    pub fn style_for(&self, mood: Mood) -> &str {
        self.get(style_key(mood))
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self::defaults()
    }
}
