//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - LLM calls (could swap Groq -> Ollama -> any chat-completions server)
//! - Reading the input messages (file today, stream or API tomorrow)
//! - Writing the output log
//! - Reporting per-turn progress

use async_trait::async_trait;
use moodsim_domain::{LogEntry, PlayerMessage};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Read error: {0}")]
    Read(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Write error: {0}")]
    Write(String),
}

// =============================================================================
// External Service Ports
// =============================================================================

/// LLM request/response types
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Sent as the single user message of the completion
    pub prompt: String,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Finish reason
    pub finish_reason: FinishReason,
}

impl LlmResponse {
    /// A plain stop-terminated completion
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: FinishReason::Stop,
        }
    }

    pub fn with_finish_reason(mut self, finish_reason: FinishReason) -> Self {
        self.finish_reason = finish_reason;
        self
    }

    /// Generation hit the token limit, so `content` may be cut short
    pub fn is_truncated(&self) -> bool {
        self.finish_reason == FinishReason::Length
    }
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Unknown,
}

/// The completion oracle.
///
/// One call, one attempt: implementations must not retry on their own, the
/// use cases decide what a failure means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Run Boundary Ports
// =============================================================================

/// Source of the messages to replay.
#[async_trait]
pub trait MessageSourcePort: Send + Sync {
    /// Load every message. Any malformed record fails the whole load.
    async fn load(&self) -> Result<Vec<PlayerMessage>, IoError>;
}

/// Destination of the processed-turn log.
#[async_trait]
pub trait LogSinkPort: Send + Sync {
    /// Write all entries, preserving their order.
    async fn write_entries(&self, entries: &[LogEntry]) -> Result<(), IoError>;
}

/// Human-readable per-turn reporting. Not machine-parsed.
pub trait ProgressPort: Send + Sync {
    fn turn_completed(&self, entry: &LogEntry);
}
