//! Line-delimited JSON log sink.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use moodsim_domain::LogEntry;

use crate::infrastructure::ports::{IoError, LogSinkPort};

/// Writes one JSON object per line, truncating any previous log.
#[derive(Debug, Clone)]
pub struct JsonLinesLogSink {
    path: PathBuf,
}

impl JsonLinesLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render entries as newline-terminated JSON lines.
fn render_lines(entries: &[LogEntry]) -> Result<String, IoError> {
    let mut out = String::new();
    for entry in entries {
        let line = serde_json::to_string(entry).map_err(|e| IoError::Write(e.to_string()))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

#[async_trait]
impl LogSinkPort for JsonLinesLogSink {
    async fn write_entries(&self, entries: &[LogEntry]) -> Result<(), IoError> {
        let content = render_lines(entries)?;
        let write_err = |e: std::io::Error| IoError::Write(format!("{}: {}", self.path.display(), e));

        let mut file = fs::File::create(&self.path).await.map_err(write_err)?;
        file.write_all(content.as_bytes()).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;

        tracing::info!(
            path = %self.path.display(),
            entries = entries.len(),
            "Wrote conversation log"
        );
        Ok(())
    }
}
