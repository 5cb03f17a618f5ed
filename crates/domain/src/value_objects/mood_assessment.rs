//! Result of classifying one player utterance.

use serde::{Deserialize, Serialize};

use crate::types::{Mood, MoodIntensity};

/// Reason recorded when the oracle call or its output could not be used
pub const FALLBACK_REASON: &str = "Parsing error or API failure";

/// Reason recorded when a structured answer carries no reason of its own
pub const NO_REASON_PROVIDED: &str = "No reason provided";

/// A classified mood plus its optional refinements.
///
/// `intensity` and `reason` are only present when the classifier ran in
/// structured mode or had to fall back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodAssessment {
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<MoodIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// True when `mood` is the caller's default rather than a classification
    #[serde(default, skip_serializing)]
    pub fallback: bool,
}

impl MoodAssessment {
    /// A plain classification with no refinements
    pub fn new(mood: Mood) -> Self {
        Self {
            mood,
            intensity: None,
            reason: None,
            fallback: false,
        }
    }

    /// The substitute used when classification could not produce a mood.
    ///
    /// Keeps `default_mood`, so a failed turn reads as "mood unchanged".
    pub fn fallback(default_mood: Mood) -> Self {
        Self {
            mood: default_mood,
            intensity: Some(MoodIntensity::Moderate),
            reason: Some(FALLBACK_REASON.to_string()),
            fallback: true,
        }
    }

    pub fn with_intensity(mut self, intensity: MoodIntensity) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Fill absent refinements with `moderate` / "No reason provided".
    pub fn with_default_refinements(mut self) -> Self {
        if self.intensity.is_none() {
            self.intensity = Some(MoodIntensity::Moderate);
        }
        if self.reason.is_none() {
            self.reason = Some(NO_REASON_PROVIDED.to_string());
        }
        self
    }
}
