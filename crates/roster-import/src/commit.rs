//! Concurrent batch commit against an external record store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use roster_model::{CandidateRecord, ImportError, Result};

/// External record-creation collaborator.
///
/// The committer treats it as opaque: every [`create`](RecordSink::create)
/// call is independently failable, and nothing is assumed about how a
/// record is stored.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Whole-batch gate, called once before any per-record attempt.
    ///
    /// An error here rejects the batch outright and no record is created;
    /// the default accepts every batch.
    async fn begin_batch(&self, _total: usize) -> anyhow::Result<()> {
        Ok(())
    }

    /// Create one record. A failure affects this record only.
    async fn create(&self, record: &CandidateRecord) -> anyhow::Result<()>;
}

/// Tuning for a batch commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// Cap on concurrently outstanding creations. `None` fans out the
    /// whole batch at once.
    pub max_in_flight: Option<usize>,
}

/// Aggregate counts surfaced at the public boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Full outcome of a batch, kept internally so per-row diagnostics can be
/// exposed later without re-deriving them. The public boundary reports
/// only the [`BatchSummary`] counts.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub successes: Vec<CandidateRecord>,
    pub failures: Vec<(CandidateRecord, anyhow::Error)>,
}

impl BatchResult {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            succeeded: self.successes.len(),
            failed: self.failures.len(),
        }
    }
}

/// Shared commit percentage, 0 to 100 and monotonically non-decreasing
/// while a commit is in flight. Cheap to clone; readers may poll from
/// another task while the committer runs.
#[derive(Clone, Debug, Default)]
pub struct ProgressHandle {
    percent: Arc<AtomicU8>,
}

impl ProgressHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }

    pub(crate) fn advance_to(&self, percent: u8) {
        self.percent.fetch_max(percent.min(100), Ordering::Relaxed);
    }

    pub(crate) fn reset(&self) {
        self.percent.store(0, Ordering::Relaxed);
    }
}

/// Submit every record for creation and wait for all of them to settle.
///
/// One failure never prevents submission or completion of any other
/// record; there is no retry and no ordering guarantee between
/// submissions. Progress is derived from the settled count, so the
/// percentage the handle reports always reflects work that has actually
/// finished. Input order is only used to pair outcomes with records in
/// the returned [`BatchResult`].
///
/// # Errors
/// [`ImportError::BatchRejected`] when the sink refuses the whole batch
/// up front; in that case no record was attempted.
pub async fn commit_records(
    sink: &dyn RecordSink,
    records: Vec<CandidateRecord>,
    options: &CommitOptions,
    progress: &ProgressHandle,
) -> Result<BatchResult> {
    let total = records.len();
    sink.begin_batch(total)
        .await
        .map_err(|reason| ImportError::BatchRejected {
            reason: reason.to_string(),
        })?;
    info!(records = total, "batch commit starting");

    if total == 0 {
        progress.advance_to(100);
        return Ok(BatchResult::default());
    }

    let limit = options.max_in_flight.unwrap_or(total).max(1);
    let mut outcomes: Vec<(usize, anyhow::Result<()>)> = Vec::with_capacity(total);
    {
        let mut settling = stream::iter(
            records
                .iter()
                .enumerate()
                .map(|(index, record)| async move { (index, sink.create(record).await) }),
        )
        .buffer_unordered(limit);
        while let Some(settled) = settling.next().await {
            outcomes.push(settled);
            progress.advance_to(((outcomes.len() * 100) / total) as u8);
        }
    }
    outcomes.sort_by_key(|(index, _)| *index);

    let mut result = BatchResult::default();
    for (record, (_, outcome)) in records.into_iter().zip(outcomes) {
        match outcome {
            Ok(()) => result.successes.push(record),
            Err(reason) => {
                warn!(error = %reason, "record creation failed");
                result.failures.push((record, reason));
            }
        }
    }
    let summary = result.summary();
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch commit settled"
    );
    Ok(result)
}
