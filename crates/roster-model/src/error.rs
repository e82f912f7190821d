use thiserror::Error;

/// Failures surfaced at the import pipeline's public boundary.
///
/// Mapping and data validation findings are not errors; they are message
/// lists that block a workflow transition. Per-record commit failures fold
/// into the aggregate counts and never appear here.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Parsing found no non-blank lines. Fatal to the upload attempt only;
    /// the session stays in the upload phase.
    #[error("the uploaded document is empty")]
    EmptyDocument,

    /// Upload name check failed. Only `.csv` uploads are accepted.
    #[error("unsupported file `{name}`: expected a .csv upload")]
    UnsupportedFile { name: String },

    /// The record store rejected the whole batch before any per-record
    /// attempt. Recoverable: the session returns to preview for retry.
    #[error("batch rejected before any record was created: {reason}")]
    BatchRejected { reason: String },

    /// A workflow call arrived in a state that has no edge for it.
    #[error("operation `{operation}` is not allowed in the {state} state")]
    OperationNotAllowed {
        operation: &'static str,
        state: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
