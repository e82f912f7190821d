//! Import workflow: the state machine, the session aggregate, and the
//! concurrent batch committer.

pub mod commit;
pub mod report;
pub mod session;
pub mod state;

pub use commit::{
    BatchResult, BatchSummary, CommitOptions, ProgressHandle, RecordSink, commit_records,
};
pub use report::ImportReport;
pub use session::ImportSession;
pub use state::{Effect, Transition, WorkflowEvent, WorkflowState, transition};
