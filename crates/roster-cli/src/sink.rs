//! JSON Lines output sink for created user records.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use roster_import::RecordSink;
use roster_model::CandidateRecord;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// Writes each created record as one JSON object per line.
///
/// Creations may settle in any order, so line order follows completion
/// order rather than row order.
pub struct JsonlSink {
    writer: Mutex<BufWriter<File>>,
}

impl JsonlSink {
    /// Create (or truncate) the output file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .await
            .with_context(|| format!("creating output file {}", path.display()))?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Flush buffered lines to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.flush().await.context("flushing output file")?;
        Ok(())
    }
}

#[async_trait]
impl RecordSink for JsonlSink {
    async fn create(&self, record: &CandidateRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(record).context("serializing record")?;
        line.push(b'\n');
        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await.context("writing record")?;
        Ok(())
    }
}
