//! Row-to-record transformation.

use roster_model::{CandidateRecord, ColumnMapping, Row, TabularDocument, TargetField};

use crate::normalize::{parse_active, resolve_role};

/// Build a candidate record from one row.
///
/// Total: never fails. Starts from the defaulted record (empty name and
/// email, `Student` role, active) and folds the mapping entries in order,
/// so when two columns target the same field the later entry wins. Unmapped
/// or blank fields degrade to their defaults instead of erroring; mapping
/// validation is expected to have blocked the cases that matter.
pub fn transform_row(row: &Row, mapping: &ColumnMapping) -> CandidateRecord {
    let mut record = CandidateRecord::default();
    for entry in mapping.entries() {
        let value = row.value(&entry.column).trim();
        match entry.field {
            TargetField::Name => record.name = value.to_string(),
            TargetField::Email => record.email = value.to_string(),
            TargetField::Role => record.role = resolve_role(value),
            TargetField::Phone => record.phone = optional(value),
            TargetField::Avatar => record.avatar = optional(value),
            TargetField::IsActive => record.is_active = parse_active(value),
            TargetField::Grade => record.grade = optional(value),
        }
    }
    record
}

/// Transform every row of a document, in row order.
pub fn transform_rows(document: &TabularDocument, mapping: &ColumnMapping) -> Vec<CandidateRecord> {
    document
        .rows
        .iter()
        .map(|row| transform_row(row, mapping))
        .collect()
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
