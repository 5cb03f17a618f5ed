//! JSON file message source using tokio::fs.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use moodsim_domain::PlayerMessage;

use crate::infrastructure::ports::{IoError, MessageSourcePort};

/// Reads the input messages from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileMessageSource {
    path: PathBuf,
}

impl JsonFileMessageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MessageSourcePort for JsonFileMessageSource {
    async fn load(&self) -> Result<Vec<PlayerMessage>, IoError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| IoError::Read(format!("{}: {}", self.path.display(), e)))?;

        let messages: Vec<PlayerMessage> = serde_json::from_str(&content)
            .map_err(|e| IoError::Parse(format!("{}: {}", self.path.display(), e)))?;

        tracing::info!(
            path = %self.path.display(),
            count = messages.len(),
            "Loaded player messages"
        );
        Ok(messages)
    }
}
