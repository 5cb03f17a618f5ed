//! Mood types for the player-to-NPC tone model
//!
//! `Mood` is the player's current stance toward the NPC as inferred by the
//! classifier. It is per player, carried forward from turn to turn, and picks
//! the persona the NPC replies with.
//!
//! `MoodIntensity` is an optional refinement the classifier may attach when
//! the oracle answers in structured form.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player's tone toward the NPC.
///
/// Only three categories exist. A session's mood is always one of them: when
/// classification fails the previous mood is kept, so there is no "unknown"
/// state to fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Asking for help, guidance, quests, directions; polite or positive requests
    Friendly,
    /// Insulting, rude, hostile, aggressive
    Angry,
    /// Anything else: casual talk, descriptions (default state)
    #[default]
    Neutral,
}

impl Mood {
    /// All moods, in the order they are presented to the classifier
    pub fn all() -> &'static [Mood] {
        &[Mood::Friendly, Mood::Angry, Mood::Neutral]
    }

    /// Lowercase wire name, as used in prompts and log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Friendly => "friendly",
            Mood::Angry => "angry",
            Mood::Neutral => "neutral",
        }
    }

    /// Short description of what puts a player in this category
    pub fn description(&self) -> &'static str {
        match self {
            Mood::Friendly => {
                "asking for help, guidance, quest, directions, polite/positive requests"
            }
            Mood::Angry => "insulting, rude, hostile, aggressive tone",
            Mood::Neutral => "anything else, casual conversation, descriptive",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "friendly" => Ok(Mood::Friendly),
            "angry" => Ok(Mood::Angry),
            "neutral" => Ok(Mood::Neutral),
            _ => Err(DomainError::parse(format!(
                "Unknown mood: '{}'. Valid values: friendly, angry, neutral",
                s
            ))),
        }
    }
}

/// How strongly the classified mood is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodIntensity {
    Mild,
    #[default]
    Moderate,
    Strong,
}

impl MoodIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodIntensity::Mild => "mild",
            MoodIntensity::Moderate => "moderate",
            MoodIntensity::Strong => "strong",
        }
    }
}

impl fmt::Display for MoodIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodIntensity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(MoodIntensity::Mild),
            "moderate" => Ok(MoodIntensity::Moderate),
            "strong" => Ok(MoodIntensity::Strong),
            _ => Err(DomainError::parse(format!(
                "Unknown mood intensity: '{}'. Valid values: mild, moderate, strong",
                s
            ))),
        }
    }
}
