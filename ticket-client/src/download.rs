//! Download sinks
//!
//! A sink receives a finished export and saves it under the suggested
//! filename. Sinks never inspect the bytes and are not retried.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::ClientResult;
use crate::api::ExportPayload;

/// Destination for export payloads
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn save(&self, payload: &ExportPayload) -> ClientResult<()>;
}

/// Writes each payload to `<dir>/<filename>`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path; the suggested name is reduced to its last component so a
    /// server-provided name cannot escape `dir`.
    pub fn target_for(&self, filename: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("export.bin");
        self.dir.join(name)
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, payload: &ExportPayload) -> ClientResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.target_for(&payload.filename);
        tokio::fs::write(&target, &payload.bytes).await?;
        tracing::info!(path = %target.display(), bytes = payload.len(), "export saved");
        Ok(())
    }
}
