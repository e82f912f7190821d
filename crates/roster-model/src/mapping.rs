use crate::field::TargetField;
use serde::{Deserialize, Serialize};

/// One column-to-field assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub column: String,
    pub field: TargetField,
}

/// Ordered list of column assignments, keyed by source column.
///
/// Entries keep insertion order. A column appears at most once; a field may
/// be targeted by several columns, in which case readers decide which entry
/// wins (validation scans for the first, the transform fold lets the last
/// overwrite).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    entries: Vec<MappingEntry>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by column: re-mapping a column replaces its target in place.
    pub fn set(&mut self, column: &str, field: TargetField) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.column == column) {
            entry.field = field;
        } else {
            self.entries.push(MappingEntry {
                column: column.to_string(),
                field,
            });
        }
    }

    /// Insert only when `column` is still unassigned.
    ///
    /// This is the auto-mapper's claim rule: once an earlier field has taken
    /// a column, later fields leave it alone. Returns whether the entry was
    /// added.
    pub fn propose(&mut self, column: &str, field: TargetField) -> bool {
        if self.target_for(column).is_some() {
            return false;
        }
        self.entries.push(MappingEntry {
            column: column.to_string(),
            field,
        });
        true
    }

    /// Remove the assignment for `column`, if any. Returns whether an entry
    /// was removed.
    pub fn clear(&mut self, column: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.column != column);
        self.entries.len() != before
    }

    pub fn target_for(&self, column: &str) -> Option<TargetField> {
        self.entries
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.field)
    }

    /// First column assigned to `field`, in insertion order.
    pub fn first_column_for(&self, field: TargetField) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.column.as_str())
    }

    pub fn is_field_mapped(&self, field: TargetField) -> bool {
        self.entries.iter().any(|entry| entry.field == field)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
