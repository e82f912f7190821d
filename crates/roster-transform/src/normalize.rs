//! Per-field value normalization.

use roster_model::UserRole;
use tracing::debug;

/// Resolve a raw role value through the synonym table.
///
/// Case-insensitive; the canonical names and the Spanish words used in the
/// product's own forms both resolve. Anything else, empty included, falls
/// back to `Student` rather than erroring; validation separately rejects
/// non-canonical spellings before rows reach this stage.
pub fn resolve_role(raw: &str) -> UserRole {
    match raw.trim().to_lowercase().as_str() {
        "admin" | "administrador" | "administradora" => UserRole::Admin,
        "teacher" | "profesor" | "profesora" | "docente" => UserRole::Teacher,
        "student" | "estudiante" | "alumno" | "alumna" => UserRole::Student,
        "parent" | "padre" | "madre" | "tutor" | "tutora" => UserRole::Parent,
        other => {
            if !other.is_empty() {
                debug!(value = other, "unrecognized role, defaulting to student");
            }
            UserRole::Student
        }
    }
}

/// True only for `true` or the localized active words; anything else,
/// blank included, reads as inactive once the column is mapped.
pub fn parse_active(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "activo" | "activa"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_resolve_case_insensitively() {
        assert_eq!(resolve_role("Profesora"), UserRole::Teacher);
        assert_eq!(resolve_role("DOCENTE"), UserRole::Teacher);
        assert_eq!(resolve_role("administradora"), UserRole::Admin);
        assert_eq!(resolve_role(" tutor "), UserRole::Parent);
        assert_eq!(resolve_role("Alumna"), UserRole::Student);
    }

    #[test]
    fn canonical_names_pass_through() {
        assert_eq!(resolve_role("admin"), UserRole::Admin);
        assert_eq!(resolve_role("TEACHER"), UserRole::Teacher);
        assert_eq!(resolve_role("student"), UserRole::Student);
        assert_eq!(resolve_role("Parent"), UserRole::Parent);
    }

    #[test]
    fn unknown_and_empty_default_to_student() {
        assert_eq!(resolve_role("director"), UserRole::Student);
        assert_eq!(resolve_role(""), UserRole::Student);
        assert_eq!(resolve_role("   "), UserRole::Student);
    }

    #[test]
    fn active_words() {
        assert!(parse_active("true"));
        assert!(parse_active("TRUE"));
        assert!(parse_active("Activo"));
        assert!(parse_active(" activa "));
        assert!(!parse_active("false"));
        assert!(!parse_active("yes"));
        assert!(!parse_active("1"));
        assert!(!parse_active(""));
    }
}
