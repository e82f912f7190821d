use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an imported user within the school.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    #[default]
    Student,
    Parent,
}

impl UserRole {
    /// Canonical roles in the order they are listed to users.
    pub const CANONICAL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Teacher,
        UserRole::Student,
        UserRole::Parent,
    ];

    /// Canonical lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
            UserRole::Parent => "parent",
        }
    }

    /// Parse one of the four canonical names, case-insensitively.
    ///
    /// This is the strict reading used by data validation. The transformer
    /// accepts a wider synonym table; the two on purpose do not agree.
    pub fn parse_canonical(value: &str) -> Option<UserRole> {
        let trimmed = value.trim();
        UserRole::CANONICAL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully transformed user record, ready for the record store.
///
/// Carries no identity or timestamps; the store assigns those on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl Default for CandidateRecord {
    /// The transformer's starting point: empty strings for the required
    /// text fields, `Student` role, active.
    fn default() -> Self {
        CandidateRecord {
            name: String::new(),
            email: String::new(),
            role: UserRole::Student,
            phone: None,
            avatar: None,
            is_active: true,
            grade: None,
        }
    }
}
