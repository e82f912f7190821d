use roster_model::{ColumnMapping, TargetField};

/// Check that every required field is covered by the mapping.
///
/// One message per missing required field, in schema order. An empty list
/// means the mapping is accepted and the session may advance to preview.
pub fn validate_mapping(mapping: &ColumnMapping) -> Vec<String> {
    let mut errors = Vec::new();
    for field in TargetField::ALL {
        if field.is_required() && !mapping.is_field_mapped(field) {
            errors.push(format!(
                "The field \"{}\" is required and must be mapped",
                field.label()
            ));
        }
    }
    errors
}
