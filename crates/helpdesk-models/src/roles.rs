//! Role labels a user can hold.
//!
//! Each role has a stable slug, used as its role code in account summaries
//! and in serialized form, and a display name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
    Instructor,
}

impl Role {
    /// Role code, e.g. `"admin"`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
            Self::Instructor => "instructor",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Student => "Student",
            Self::Instructor => "Instructor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl std::error::Error for ParseRoleError {}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid role", self.0)
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the slug or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_slugs_and_names() {
        assert_eq!(Role::Admin.slug(), "admin");
        assert_eq!(Role::Instructor.name(), "Instructor");
        assert_eq!(Role::Student.to_string(), "Student");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Student".parse::<Role>(), Ok(Role::Student));
        assert_eq!(" INSTRUCTOR ".parse::<Role>(), Ok(Role::Instructor));
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        let err = "Boss".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError("Boss".to_string()));
        assert_eq!(err.to_string(), "\"Boss\" is not a valid role");
    }

    #[test]
    fn test_role_serde_uses_slug() {
        let json = serde_json::to_string(&Role::Instructor).unwrap();
        assert_eq!(json, "\"instructor\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_role_ordering() {
        let mut roles = vec![Role::Instructor, Role::Admin, Role::Student];
        roles.sort();
        assert_eq!(roles, vec![Role::Admin, Role::Student, Role::Instructor]);
    }
}
