//! Hand-written test doubles for multi-turn scenarios.
//!
//! `MockLlmPort` covers single-call expectations; these doubles script whole
//! runs and record what the engine did.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use moodsim_domain::{LogEntry, PlayerMessage};

use crate::infrastructure::ports::{
    IoError, LlmError, LlmPort, LlmRequest, LlmResponse, LogSinkPort, MessageSourcePort,
    ProgressPort,
};

/// Which kind of oracle call a request was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Classification,
    Reply,
}

impl CallKind {
    fn of(request: &LlmRequest) -> Self {
        if request.prompt.trim_end().ends_with("NPC:") {
            Self::Reply
        } else {
            Self::Classification
        }
    }
}

type Scripted = Result<String, LlmError>;

/// LLM double with separate answer queues for classification and reply calls.
///
/// An exhausted queue answers `"neutral"` for classification and
/// `"Hm."` for replies.
#[derive(Debug, Default)]
pub struct ScriptedLlm {
    classifications: Mutex<VecDeque<Scripted>>,
    replies: Mutex<VecDeque<Scripted>>,
    always_fail: bool,
    calls: Mutex<Vec<(CallKind, LlmRequest)>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a transport error.
    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    pub fn classify_as(self, answer: impl Into<String>) -> Self {
        self.push(CallKind::Classification, Ok(answer.into()))
    }

    pub fn reply_with(self, answer: impl Into<String>) -> Self {
        self.push(CallKind::Reply, Ok(answer.into()))
    }

    pub fn fail_next(self, kind: CallKind, error: LlmError) -> Self {
        self.push(kind, Err(error))
    }

    fn push(self, kind: CallKind, answer: Scripted) -> Self {
        let queue = match kind {
            CallKind::Classification => &self.classifications,
            CallKind::Reply => &self.replies,
        };
        queue.lock().expect("lock").push_back(answer);
        self
    }

    /// Every request seen so far, in call order.
    pub fn calls(&self) -> Vec<(CallKind, LlmRequest)> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("lock").len()
    }

    /// Prompts of one kind, in call order.
    pub fn prompts(&self, kind: CallKind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, request)| request.prompt)
            .collect()
    }
}

#[async_trait]
impl LlmPort for ScriptedLlm {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let kind = CallKind::of(&request);
        self.calls.lock().expect("lock").push((kind, request));

        if self.always_fail {
            return Err(LlmError::RequestFailed("scripted outage".to_string()));
        }

        let (queue, default) = match kind {
            CallKind::Classification => (&self.classifications, "neutral"),
            CallKind::Reply => (&self.replies, "Hm."),
        };
        let next = queue.lock().expect("lock").pop_front();
        next.unwrap_or_else(|| Ok(default.to_string()))
            .map(LlmResponse::text)
    }
}

/// Message source backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryMessageSource {
    messages: Vec<PlayerMessage>,
    fail_with: Option<String>,
}

impl InMemoryMessageSource {
    pub fn new(messages: Vec<PlayerMessage>) -> Self {
        Self {
            messages,
            fail_with: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            fail_with: Some(reason.into()),
        }
    }
}

#[async_trait]
impl MessageSourcePort for InMemoryMessageSource {
    async fn load(&self) -> Result<Vec<PlayerMessage>, IoError> {
        match &self.fail_with {
            Some(reason) => Err(IoError::Parse(reason.clone())),
            None => Ok(self.messages.clone()),
        }
    }
}

/// Log sink that keeps every batch it was handed.
#[derive(Debug, Default)]
pub struct RecordingLogSink {
    batches: Mutex<Vec<Vec<LogEntry>>>,
    fail: bool,
}

impl RecordingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<LogEntry>> {
        self.batches.lock().expect("lock").clone()
    }

    /// All written entries, flattened.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.batches().into_iter().flatten().collect()
    }
}

#[async_trait]
impl LogSinkPort for RecordingLogSink {
    async fn write_entries(&self, entries: &[LogEntry]) -> Result<(), IoError> {
        if self.fail {
            return Err(IoError::Write("disk full".to_string()));
        }
        self.batches.lock().expect("lock").push(entries.to_vec());
        Ok(())
    }
}

/// Progress reporter that remembers every completed turn.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    turns: Mutex<Vec<LogEntry>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> Vec<LogEntry> {
        self.turns.lock().expect("lock").clone()
    }
}

impl ProgressPort for RecordingProgress {
    fn turn_completed(&self, entry: &LogEntry) {
        self.turns.lock().expect("lock").push(entry.clone());
    }
}
