//! Import session aggregate.
//!
//! Owns the parsed document, the column mapping and both validation-error
//! lists, and drives the pure state machine in `state`. Every operation is
//! processed to completion before the next; the only suspension point is
//! the batch commit itself.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use roster_ingest::{is_supported_upload, parse_delimited};
use roster_map::{auto_map, validate_mapping};
use roster_model::{
    CandidateRecord, ColumnMapping, ImportError, Result, TabularDocument, TargetField,
};
use roster_transform::transform_rows;
use roster_validate::validate_data;

use crate::commit::{BatchSummary, CommitOptions, ProgressHandle, RecordSink, commit_records};
use crate::report::ImportReport;
use crate::state::{Effect, WorkflowEvent, WorkflowState, transition};

/// One user-visible import flow, from upload to completion.
#[derive(Debug, Default)]
pub struct ImportSession {
    state: WorkflowState,
    file_name: Option<String>,
    document: Option<TabularDocument>,
    mapping: ColumnMapping,
    mapping_errors: Vec<String>,
    data_errors: Vec<String>,
    batch_error: Option<String>,
    progress: ProgressHandle,
    result: Option<BatchSummary>,
    report: Option<ImportReport>,
    options: CommitOptions,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the commit tuning for this session.
    #[must_use]
    pub fn with_commit_options(mut self, options: CommitOptions) -> Self {
        self.options = options;
        self
    }

    // ===== Operations =====

    /// Accept an uploaded file and parse it.
    ///
    /// On success the auto-mapper runs over the fresh headers and the
    /// session moves to mapping. A rejected name or an empty document
    /// surfaces as an error with the state unchanged, so the caller can
    /// offer a different file.
    pub fn upload(&mut self, file_name: &str, text: &str) -> Result<()> {
        self.require_state(WorkflowState::Upload, "upload")?;
        if !is_supported_upload(file_name) {
            return Err(ImportError::UnsupportedFile {
                name: file_name.to_string(),
            });
        }
        match parse_delimited(text) {
            Ok(document) => {
                info!(
                    file = %file_name,
                    headers = document.headers.len(),
                    rows = document.row_count(),
                    "upload parsed"
                );
                self.file_name = Some(file_name.to_string());
                self.document = Some(document);
                self.apply(WorkflowEvent::ParseSucceeded);
                Ok(())
            }
            Err(error) => {
                self.apply(WorkflowEvent::ParseFailed);
                Err(error)
            }
        }
    }

    /// Map or re-map a column; upsert-by-column semantics.
    pub fn map_column(&mut self, column: &str, field: TargetField) -> Result<()> {
        self.require_state(WorkflowState::Mapping, "map_column")?;
        self.mapping.set(column, field);
        self.apply(WorkflowEvent::MappingEdited);
        Ok(())
    }

    /// Drop the mapping entry for a column, if any.
    pub fn clear_column(&mut self, column: &str) -> Result<()> {
        self.require_state(WorkflowState::Mapping, "clear_column")?;
        self.mapping.clear(column);
        self.apply(WorkflowEvent::MappingEdited);
        Ok(())
    }

    /// Run both validators and enter preview when both come back clean.
    ///
    /// Returns whether preview was entered; on `false` the error lists are
    /// populated and the session stays in mapping.
    pub fn request_preview(&mut self) -> Result<bool> {
        self.require_state(WorkflowState::Mapping, "request_preview")?;
        let Some(document) = self.document.as_ref() else {
            return Err(self.not_allowed("request_preview"));
        };
        self.mapping_errors = validate_mapping(&self.mapping);
        self.data_errors = validate_data(document, &self.mapping);
        if self.mapping_errors.is_empty() && self.data_errors.is_empty() {
            self.apply(WorkflowEvent::ValidationPassed);
            Ok(true)
        } else {
            info!(
                mapping_errors = self.mapping_errors.len(),
                data_errors = self.data_errors.len(),
                "validation blocked preview"
            );
            self.apply(WorkflowEvent::ValidationFailed);
            Ok(false)
        }
    }

    /// The transformed records exactly as a commit would submit them.
    pub fn preview_records(&self) -> Result<Vec<CandidateRecord>> {
        if self.state != WorkflowState::Preview {
            return Err(self.not_allowed("preview_records"));
        }
        let Some(document) = self.document.as_ref() else {
            return Err(self.not_allowed("preview_records"));
        };
        Ok(transform_rows(document, &self.mapping))
    }

    /// Leave preview for another round of mapping edits.
    ///
    /// Data-validation errors are cleared; the mapping is preserved.
    pub fn back_to_mapping(&mut self) -> Result<()> {
        self.require_state(WorkflowState::Preview, "back_to_mapping")?;
        self.apply(WorkflowEvent::BackToMapping);
        Ok(())
    }

    /// Transform every row and commit the batch against `sink`.
    ///
    /// Ends in `Completed` with the aggregate counts, or falls back to
    /// `Preview` with document and mapping intact when the sink rejects
    /// the whole batch before any per-record attempt.
    pub async fn commit(&mut self, sink: &dyn RecordSink) -> Result<BatchSummary> {
        self.require_state(WorkflowState::Preview, "commit")?;
        let Some(document) = self.document.as_ref() else {
            return Err(self.not_allowed("commit"));
        };
        let records = transform_rows(document, &self.mapping);
        let total = records.len();
        let file_name = self.file_name.clone().unwrap_or_default();

        self.batch_error = None;
        self.progress.reset();
        self.apply(WorkflowEvent::CommitStarted);
        let started_at = Utc::now();
        let clock = Instant::now();
        match commit_records(sink, records, &self.options, &self.progress).await {
            Ok(batch) => {
                let summary = batch.summary();
                self.result = Some(summary);
                self.report = Some(ImportReport {
                    file_name,
                    started_at,
                    finished_at: Utc::now(),
                    duration_ms: clock.elapsed().as_millis() as u64,
                    total,
                    succeeded: summary.succeeded,
                    failed: summary.failed,
                });
                self.apply(WorkflowEvent::CommitSettled);
                Ok(summary)
            }
            Err(error) => {
                self.batch_error = Some(error.to_string());
                self.apply(WorkflowEvent::CommitFailed);
                Err(error)
            }
        }
    }

    /// Request cancellation.
    ///
    /// Honored from upload, mapping and preview, where it discards the
    /// session. Refused, returning `false` with the state untouched, while
    /// a commit is in flight and in the terminal states.
    pub fn cancel(&mut self) -> bool {
        match transition(self.state, WorkflowEvent::CancelRequested) {
            Some(step) if step.next == WorkflowState::Cancelled => {
                self.apply(WorkflowEvent::CancelRequested);
                true
            }
            _ => false,
        }
    }

    // ===== Read surface =====

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn document(&self) -> Option<&TabularDocument> {
        self.document.as_ref()
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn mapping_errors(&self) -> &[String] {
        &self.mapping_errors
    }

    pub fn data_errors(&self) -> &[String] {
        &self.data_errors
    }

    /// Message from the last whole-batch rejection, if the session fell
    /// back to preview.
    pub fn batch_error(&self) -> Option<&str> {
        self.batch_error.as_deref()
    }

    /// Commit percentage, 0 to 100, monotonic while importing.
    pub fn progress(&self) -> u8 {
        self.progress.percent()
    }

    /// Clone of the shared progress handle, for callers that want to poll
    /// from another task while `commit` is awaited.
    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn result(&self) -> Option<BatchSummary> {
        self.result
    }

    pub fn report(&self) -> Option<&ImportReport> {
        self.report.as_ref()
    }

    // ===== Internals =====

    fn require_state(&self, expected: WorkflowState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.not_allowed(operation))
        }
    }

    fn not_allowed(&self, operation: &'static str) -> ImportError {
        ImportError::OperationNotAllowed {
            operation,
            state: self.state.to_string(),
        }
    }

    fn apply(&mut self, event: WorkflowEvent) {
        if let Some(step) = transition(self.state, event) {
            debug!(from = %self.state, to = %step.next, event = ?event, "workflow transition");
            if let Some(effect) = step.effect {
                self.run_effect(effect);
            }
            self.state = step.next;
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ApplyAutoMap => {
                let headers = self
                    .document
                    .as_ref()
                    .map(|document| document.headers.clone())
                    .unwrap_or_default();
                self.mapping = auto_map(&headers);
                debug!(mapped = self.mapping.len(), "auto-mapping applied");
            }
            Effect::ClearDataErrors => self.data_errors.clear(),
            // The commit path records the message itself; the marker keeps
            // the table explicit about the edge carrying one.
            Effect::RecordBatchError => {}
            Effect::DiscardSession => {
                self.file_name = None;
                self.document = None;
                self.mapping = ColumnMapping::new();
                self.mapping_errors.clear();
                self.data_errors.clear();
                self.batch_error = None;
                self.result = None;
                self.report = None;
            }
        }
    }
}
