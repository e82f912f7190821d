//! Header-to-field inference for freshly parsed uploads.

use roster_model::{ColumnMapping, TargetField};
use tracing::debug;

/// Propose a mapping from header text alone.
///
/// Pure and deterministic. For each target field in schema order, the scan
/// picks the first header whose lower-cased text contains the field's key
/// or display label (also lower-cased). Headers stay in consideration for
/// later fields, but a header already claimed keeps its first field; a
/// field without a textual match is left unmapped for the user to fill in.
pub fn auto_map(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for field in TargetField::ALL {
        let key = field.key().to_lowercase();
        let label = field.label().to_lowercase();
        let matched = headers.iter().find(|header| {
            let lowered = header.to_lowercase();
            lowered.contains(&key) || lowered.contains(&label)
        });
        if let Some(header) = matched
            && mapping.propose(header, field)
        {
            debug!(column = %header, field = %field, "auto-mapped column");
        }
    }
    mapping
}
