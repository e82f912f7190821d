//! Result types shared between command execution and exit-code handling.

use roster_import::BatchSummary;

/// Outcome of the import command.
#[derive(Debug, Clone, Copy)]
pub enum ImportOutcome {
    /// Validation blocked the import before any user was created.
    Blocked,
    /// Dry run stopped after the preview.
    DryRun,
    /// The batch was committed.
    Committed(BatchSummary),
}

impl ImportOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Blocked => 1,
            Self::DryRun => 0,
            Self::Committed(summary) => i32::from(summary.failed > 0),
        }
    }
}
