//! Mood classification via LLM.
//!
//! Infers a player's tone toward the NPC from their latest message and the
//! few before it. Classification never fails from the caller's point of
//! view: transport errors and unusable answers resolve to the caller's
//! default mood.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use moodsim_domain::{DomainError, Mood, MoodAssessment, MoodIntensity};

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest};
use crate::prompt_templates::{keys, PromptTemplates};

/// Which answer shape the classifier asks the oracle for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassificationMode {
    /// JSON object with `mood`, `intensity` and `reason`
    #[default]
    Structured,
    /// A single category word
    BareWord,
}

impl ClassificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::BareWord => "bare_word",
        }
    }
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassificationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "structured" | "json" => Ok(Self::Structured),
            "bare_word" | "word" => Ok(Self::BareWord),
            _ => Err(DomainError::parse(format!(
                "Unknown classification mode: '{}'. Valid values: structured, bare_word",
                s
            ))),
        }
    }
}

/// Sampling settings for classification calls.
#[derive(Debug, Clone)]
pub struct MoodClassifierConfig {
    pub mode: ClassificationMode,
    /// Zero keeps repeated runs as close to identical as the oracle allows
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for MoodClassifierConfig {
    fn default() -> Self {
        Self {
            mode: ClassificationMode::Structured,
            temperature: 0.0,
            max_tokens: 50,
        }
    }
}

/// Classifies player tone using the LLM.
pub struct MoodClassifier {
    llm: Arc<dyn LlmPort>,
    prompts: Arc<PromptTemplates>,
    config: MoodClassifierConfig,
}

impl MoodClassifier {
    pub fn new(llm: Arc<dyn LlmPort>, prompts: Arc<PromptTemplates>) -> Self {
        Self {
            llm,
            prompts,
            config: MoodClassifierConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MoodClassifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(&self) -> ClassificationMode {
        self.config.mode
    }

    /// Classify `latest` given the player's earlier messages.
    ///
    /// # Arguments
    /// * `history` - Up to the last few prior messages, oldest first
    /// * `latest` - The message being classified
    /// * `default_mood` - Returned when the oracle fails or answers nonsense;
    ///   callers pass the player's current mood so a failure leaves it unchanged
    ///
    /// Makes exactly one oracle call.
    pub async fn classify(
        &self,
        history: &[String],
        latest: &str,
        default_mood: Mood,
    ) -> MoodAssessment {
        let request = LlmRequest::new(self.build_prompt(history, latest))
            .with_temperature(self.config.temperature)
            .with_max_tokens(Some(self.config.max_tokens));

        let outcome = match self.llm.generate(request).await {
            Ok(response) => {
                if response.is_truncated() {
                    tracing::warn!(
                        max_tokens = self.config.max_tokens,
                        "Classification hit the token limit, answer may be cut off"
                    );
                }
                self.parse_response(&response.content, default_mood)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(assessment) => {
                tracing::debug!(
                    mood = %assessment.mood,
                    intensity = ?assessment.intensity,
                    "Classified player mood"
                );
                assessment
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    default_mood = %default_mood,
                    "Mood classification failed, keeping previous mood"
                );
                MoodAssessment::fallback(default_mood)
            }
        }
    }

    fn build_prompt(&self, history: &[String], latest: &str) -> String {
        let format = match self.config.mode {
            ClassificationMode::Structured => {
                self.prompts.get(keys::CLASSIFICATION_STRUCTURED_FORMAT)
            }
            ClassificationMode::BareWord => self.prompts.get(keys::CLASSIFICATION_BARE_WORD_FORMAT),
        };

        format!(
            "{}\n\nCategories:\n{}\n\nConversation history:\n{}\n\nLatest message:\nPlayer: \"{}\"\n\n{}",
            self.prompts.get(keys::CLASSIFICATION_INSTRUCTIONS),
            render_categories(),
            render_history(history),
            latest,
            format
        )
    }

    /// Turn the oracle's text into an assessment.
    ///
    /// Both answer shapes are accepted regardless of mode; the mode only
    /// decides whether missing refinements get defaults.
    fn parse_response(
        &self,
        response: &str,
        default_mood: Mood,
    ) -> Result<MoodAssessment, LlmError> {
        let trimmed = response.trim();
        if trimmed.is_empty() {
            return Err(LlmError::InvalidResponse("Empty classification".to_string()));
        }

        let assessment = if trimmed.contains('{') {
            parse_structured(&extract_json(trimmed), default_mood)?
        } else {
            parse_bare_word(trimmed)?
        };

        Ok(match self.config.mode {
            ClassificationMode::Structured => assessment.with_default_refinements(),
            ClassificationMode::BareWord => assessment,
        })
    }
}

/// One `- <mood> (<description>)` line per category.
fn render_categories() -> String {
    Mood::all()
        .iter()
        .map(|mood| format!("- {} ({})", mood, mood.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render prior messages one per line as `Player: <text>`, oldest first.
pub(crate) fn render_history(history: &[String]) -> String {
    if history.is_empty() {
        return "(no previous messages)".to_string();
    }
    history
        .iter()
        .map(|text| format!("Player: {}", text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_bare_word(response: &str) -> Result<MoodAssessment, LlmError> {
    let word = response.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '.'));
    let mood = word
        .parse::<Mood>()
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
    Ok(MoodAssessment::new(mood))
}

fn parse_structured(json_str: &str, default_mood: Mood) -> Result<MoodAssessment, LlmError> {
    let parsed: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| LlmError::InvalidResponse(format!("Invalid JSON in response: {}", e)))?;

    let object = parsed
        .as_object()
        .ok_or_else(|| LlmError::InvalidResponse("Expected a JSON object".to_string()))?;

    let mood = match object.get("mood") {
        None | Some(serde_json::Value::Null) => default_mood,
        Some(serde_json::Value::String(value)) => value
            .parse::<Mood>()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?,
        Some(other) => {
            return Err(LlmError::InvalidResponse(format!(
                "'mood' must be a string, got {}",
                other
            )))
        }
    };

    let mut assessment = MoodAssessment::new(mood);

    if let Some(intensity) = object
        .get("intensity")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<MoodIntensity>().ok())
    {
        assessment = assessment.with_intensity(intensity);
    }

    if let Some(reason) = object
        .get("reason")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        assessment = assessment.with_reason(reason);
    }

    Ok(assessment)
}

/// Extract JSON from a response that might have markdown code blocks or extra text.
fn extract_json(response: &str) -> String {
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim().to_string();
        }
    }

    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            let content = response[start + 3..start + 3 + end].trim();
            // Skip language identifier if present
            if let Some(newline_pos) = content.find('\n') {
                let first_line = &content[..newline_pos];
                if !first_line.starts_with('{') {
                    return content[newline_pos + 1..].trim().to_string();
                }
            }
            return content.to_string();
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}
