//! Semantic validation of mapped values, row by row.

use std::sync::LazyLock;

use regex::Regex;
use roster_model::{ColumnMapping, TabularDocument, TargetField, UserRole};
use tracing::debug;

// local@domain.tld: no whitespace, exactly one `@`, at least one `.` after
// it with something on both sides.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validate mapped values row by row.
///
/// Row numbers in messages are 1-based file line numbers (`index + 2`,
/// accounting for the header line). Within a row the email check runs
/// before the role check; across rows, file order. Only mapped fields are
/// checked, and when several columns map the same field the first entry is
/// the one read here.
///
/// The role check accepts the four canonical names only. The transformer's
/// synonym table is wider on purpose, so a localized synonym can fail here
/// yet still resolve downstream; both sides of that mismatch are covered by
/// tests rather than unified.
pub fn validate_data(document: &TabularDocument, mapping: &ColumnMapping) -> Vec<String> {
    let email_column = mapping.first_column_for(TargetField::Email);
    let role_column = mapping.first_column_for(TargetField::Role);

    let mut errors = Vec::new();
    for (index, row) in document.rows.iter().enumerate() {
        let row_number = index + 2;
        if let Some(column) = email_column {
            let value = row.value(column);
            if !EMAIL_SHAPE.is_match(value) {
                errors.push(format!("Row {row_number}: invalid email \"{value}\""));
            }
        }
        if let Some(column) = role_column {
            let value = row.value(column);
            if !value.trim().is_empty() && UserRole::parse_canonical(value).is_none() {
                errors.push(format!(
                    "Row {row_number}: invalid role \"{value}\". Allowed values: admin, teacher, student, parent"
                ));
            }
        }
    }
    debug!(
        rows = document.row_count(),
        errors = errors.len(),
        "data validation finished"
    );
    errors
}
