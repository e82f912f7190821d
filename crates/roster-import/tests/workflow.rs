use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use roster_import::{
    BatchSummary, CommitOptions, ImportSession, RecordSink, WorkflowState,
};
use roster_ingest::TEMPLATE_CSV;
use roster_model::{CandidateRecord, ImportError, TargetField, UserRole};

#[derive(Default)]
struct CollectingSink {
    created: Mutex<Vec<CandidateRecord>>,
}

#[async_trait]
impl RecordSink for CollectingSink {
    async fn create(&self, record: &CandidateRecord) -> anyhow::Result<()> {
        self.created.lock().expect("lock").push(record.clone());
        Ok(())
    }
}

/// Fails creation for one specific email, accepts everything else.
struct GrudgeSink {
    refused_email: &'static str,
}

#[async_trait]
impl RecordSink for GrudgeSink {
    async fn create(&self, record: &CandidateRecord) -> anyhow::Result<()> {
        if record.email == self.refused_email {
            anyhow::bail!("duplicate email");
        }
        Ok(())
    }
}

/// Rejects the whole batch before any record is attempted.
struct ClosedSink;

#[async_trait]
impl RecordSink for ClosedSink {
    async fn begin_batch(&self, _total: usize) -> anyhow::Result<()> {
        anyhow::bail!("record store unavailable")
    }

    async fn create(&self, _record: &CandidateRecord) -> anyhow::Result<()> {
        unreachable!("begin_batch already rejected the batch")
    }
}

struct SlowSink;

#[async_trait]
impl RecordSink for SlowSink {
    async fn create(&self, _record: &CandidateRecord) -> anyhow::Result<()> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok(())
    }
}

fn session_at_preview(text: &str) -> ImportSession {
    let mut session = ImportSession::new();
    session.upload("alumnos.csv", text).expect("upload");
    assert!(session.request_preview().expect("request preview"));
    session
}

#[tokio::test]
async fn template_round_trips_to_completed() {
    let mut session = ImportSession::new();
    session
        .upload("plantilla.csv", TEMPLATE_CSV)
        .expect("template uploads");
    assert_eq!(session.state(), WorkflowState::Mapping);
    // Auto-mapping covers every template column; avatar has none.
    assert_eq!(session.mapping().len(), 6);
    assert!(!session.mapping().is_field_mapped(TargetField::Avatar));

    assert!(session.request_preview().expect("validators pass"));
    let preview = session.preview_records().expect("preview");
    assert_eq!(preview.len(), 3);
    assert_eq!(preview[1].role, UserRole::Teacher);
    assert_eq!(preview[1].grade.as_deref(), Some("5A"));
    assert!(!preview[2].is_active);

    let sink = CollectingSink::default();
    let summary = session.commit(&sink).await.expect("commit");
    assert_eq!(summary, BatchSummary { succeeded: 3, failed: 0 });
    assert_eq!(session.state(), WorkflowState::Completed);
    assert_eq!(session.progress(), 100);

    let created = sink.created.lock().expect("lock");
    assert_eq!(created.len(), 3);
    assert!(created.iter().any(|record| record.role == UserRole::Admin));

    let report = session.report().expect("report present");
    assert_eq!(report.file_name, "plantilla.csv");
    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 3);
}

#[tokio::test]
async fn partial_failure_folds_into_counts() {
    let text = "name,email,role\n\
                Ana,ana@x.com,teacher\n\
                Juan,juan@x.com,student\n\
                Eva,eva@x.com,admin";
    let mut session = session_at_preview(text);
    let sink = GrudgeSink {
        refused_email: "juan@x.com",
    };
    let summary = session.commit(&sink).await.expect("commit settles");
    assert_eq!(summary, BatchSummary { succeeded: 2, failed: 1 });
    assert_eq!(session.state(), WorkflowState::Completed);
    assert_eq!(session.result(), Some(summary));
    // Per-record reasons stay behind the boundary.
    assert_eq!(session.batch_error(), None);
}

#[tokio::test]
async fn whole_batch_rejection_falls_back_to_preview() {
    let text = "name,email,role\nAna,ana@x.com,teacher";
    let mut session = session_at_preview(text);

    let error = session.commit(&ClosedSink).await.expect_err("rejected");
    assert!(matches!(error, ImportError::BatchRejected { .. }));
    assert_eq!(session.state(), WorkflowState::Preview);
    assert!(session.document().is_some());
    assert!(session.mapping().is_field_mapped(TargetField::Email));
    assert!(
        session
            .batch_error()
            .expect("batch error recorded")
            .contains("record store unavailable")
    );

    // Document and mapping survived, so the same session can retry.
    let sink = CollectingSink::default();
    let summary = session.commit(&sink).await.expect("retry commits");
    assert_eq!(summary, BatchSummary { succeeded: 1, failed: 0 });
    assert_eq!(session.state(), WorkflowState::Completed);
    assert_eq!(session.batch_error(), None);
}

#[test]
fn validation_failures_keep_the_session_in_mapping() {
    let text = "name,email,cargo\n\
                Ana,not-an-email,teacher\n\
                Juan,juan@x.com,director";
    let mut session = ImportSession::new();
    session.upload("alumnos.csv", text).expect("upload");

    assert!(!session.request_preview().expect("blocked preview"));
    assert_eq!(session.state(), WorkflowState::Mapping);
    assert_eq!(
        session.mapping_errors(),
        ["The field \"Role\" is required and must be mapped"]
    );
    assert_eq!(session.data_errors(), ["Row 2: invalid email \"not-an-email\""]);

    // Mapping the role column surfaces the bad value in the next round.
    session
        .map_column("cargo", TargetField::Role)
        .expect("map role");
    assert!(!session.request_preview().expect("still blocked"));
    assert!(session.mapping_errors().is_empty());
    assert_eq!(
        session.data_errors(),
        [
            "Row 2: invalid email \"not-an-email\"",
            "Row 3: invalid role \"director\". Allowed values: admin, teacher, student, parent",
        ]
    );
}

#[test]
fn back_to_mapping_clears_data_errors_and_keeps_the_mapping() {
    let text = "name,email,role\nAna,ana@x.com,teacher";
    let mut session = session_at_preview(text);

    session.back_to_mapping().expect("back");
    assert_eq!(session.state(), WorkflowState::Mapping);
    assert!(session.data_errors().is_empty());
    assert_eq!(session.mapping().len(), 3);

    // Edits are legal again, then preview once more.
    session
        .map_column("name", TargetField::Name)
        .expect("re-map");
    assert!(session.request_preview().expect("preview again"));
}

#[test]
fn upload_rejections_leave_the_session_reusable() {
    let mut session = ImportSession::new();

    let error = session.upload("alumnos.xlsx", "irrelevant").expect_err("bad name");
    assert!(matches!(error, ImportError::UnsupportedFile { .. }));
    assert_eq!(session.state(), WorkflowState::Upload);

    let error = session.upload("alumnos.csv", "\n\n").expect_err("empty");
    assert!(matches!(error, ImportError::EmptyDocument));
    assert_eq!(session.state(), WorkflowState::Upload);

    session
        .upload("alumnos.csv", "name,email,role\nAna,ana@x.com,teacher")
        .expect("third attempt lands");
    assert_eq!(session.state(), WorkflowState::Mapping);
}

#[tokio::test]
async fn operations_out_of_phase_are_refused() {
    let mut session = ImportSession::new();
    let sink = CollectingSink::default();

    let error = session.commit(&sink).await.expect_err("commit in upload");
    assert!(matches!(
        error,
        ImportError::OperationNotAllowed { operation: "commit", .. }
    ));
    assert!(session.map_column("a", TargetField::Name).is_err());
    assert!(session.preview_records().is_err());

    session
        .upload("alumnos.csv", "name,email,role\nAna,ana@x.com,teacher")
        .expect("upload");
    assert!(session.request_preview().expect("preview"));

    // Mapping is frozen once preview is entered.
    let error = session
        .map_column("name", TargetField::Avatar)
        .expect_err("frozen mapping");
    assert!(matches!(
        error,
        ImportError::OperationNotAllowed { operation: "map_column", .. }
    ));
}

#[test]
fn cancel_discards_editable_sessions_and_stops_there() {
    let mut session = ImportSession::new();
    session
        .upload("alumnos.csv", "name,email,role\nAna,ana@x.com,teacher")
        .expect("upload");
    assert_eq!(session.state(), WorkflowState::Mapping);

    assert!(session.cancel());
    assert_eq!(session.state(), WorkflowState::Cancelled);
    assert!(session.document().is_none());
    assert!(session.mapping().is_empty());

    // Terminal: nothing else is accepted, cancel included.
    assert!(!session.cancel());
    assert!(session.upload("alumnos.csv", "name\nAna").is_err());
}

#[tokio::test]
async fn cancel_is_refused_once_the_import_finished() {
    let mut session = session_at_preview("name,email,role\nAna,ana@x.com,teacher");
    session
        .commit(&CollectingSink::default())
        .await
        .expect("commit");
    assert_eq!(session.state(), WorkflowState::Completed);
    assert!(!session.cancel());
    assert_eq!(session.state(), WorkflowState::Completed);
    assert!(session.report().is_some());
}

#[tokio::test]
async fn progress_is_observable_and_monotonic_while_committing() {
    let text = "name,email,role\n\
                A,a@x.com,teacher\n\
                B,b@x.com,teacher\n\
                C,c@x.com,teacher\n\
                D,d@x.com,teacher";
    let mut session = session_at_preview(text).with_commit_options(CommitOptions {
        max_in_flight: Some(1),
    });

    let handle = session.progress_handle();
    let samples = std::sync::Arc::new(Mutex::new(Vec::new()));
    let poller = {
        let samples = std::sync::Arc::clone(&samples);
        tokio::spawn(async move {
            loop {
                samples.lock().expect("lock").push(handle.percent());
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
    };

    session.commit(&SlowSink).await.expect("commit");
    poller.abort();

    assert_eq!(session.progress(), 100);
    let samples = samples.lock().expect("lock");
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
}
