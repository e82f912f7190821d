use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target schema position for an imported user record.
///
/// Declaration order is schema order; every pass that walks the schema
/// (auto-mapping, mapping validation, template generation) iterates
/// [`TargetField::ALL`] so the order stays consistent across stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetField {
    Name,
    Email,
    Role,
    Phone,
    Avatar,
    IsActive,
    Grade,
}

impl TargetField {
    /// All fields in schema order.
    pub const ALL: [TargetField; 7] = [
        TargetField::Name,
        TargetField::Email,
        TargetField::Role,
        TargetField::Phone,
        TargetField::Avatar,
        TargetField::IsActive,
        TargetField::Grade,
    ];

    /// Machine key used for header matching and the template header line.
    pub fn key(&self) -> &'static str {
        match self {
            TargetField::Name => "name",
            TargetField::Email => "email",
            TargetField::Role => "role",
            TargetField::Phone => "phone",
            TargetField::Avatar => "avatar",
            TargetField::IsActive => "isActive",
            TargetField::Grade => "grade",
        }
    }

    /// Display label used in validation messages and mapping summaries.
    pub fn label(&self) -> &'static str {
        match self {
            TargetField::Name => "Name",
            TargetField::Email => "Email",
            TargetField::Role => "Role",
            TargetField::Phone => "Phone",
            TargetField::Avatar => "Avatar",
            TargetField::IsActive => "Active",
            TargetField::Grade => "Grade",
        }
    }

    /// Returns true if a mapping without this field must be rejected.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            TargetField::Name | TargetField::Email | TargetField::Role
        )
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for TargetField {
    type Err = String;

    /// Parse a field key (case-insensitive), as accepted by CLI overrides.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TargetField::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                format!(
                    "unknown target field `{trimmed}` (expected one of: name, email, role, phone, avatar, isActive, grade)"
                )
            })
    }
}
