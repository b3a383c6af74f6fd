//! Closed role enumeration
//!
//! Roles are a fixed set known at compile time. Representing them as an enum
//! (rather than free-form strings compared by list membership) lets the
//! permission table in `policy` be exhaustive-checked by the compiler.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's role, governing which actions they may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "Security Analyst")]
    SecurityAnalyst,
    Developer,
    #[serde(rename = "App Owner")]
    AppOwner,
    Management,
    Viewer,
}

impl Role {
    /// Every role, for exhaustive iteration in tests and seeds
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::SecurityAnalyst,
        Role::Developer,
        Role::AppOwner,
        Role::Management,
        Role::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SecurityAnalyst => "Security Analyst",
            Role::Developer => "Developer",
            Role::AppOwner => "App Owner",
            Role::Management => "Management",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Security Analyst" => Ok(Role::SecurityAnalyst),
            "Developer" => Ok(Role::Developer),
            "App Owner" => Ok(Role::AppOwner),
            "Management" => Ok(Role::Management),
            "Viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_use_spaces() {
        let json = serde_json::to_string(&Role::SecurityAnalyst).unwrap();
        assert_eq!(json, "\"Security Analyst\"");
        let back: Role = serde_json::from_str("\"App Owner\"").unwrap();
        assert_eq!(back, Role::AppOwner);
    }

    #[test]
    fn test_string_roundtrip_all() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("Superuser".parse::<Role>().is_err());
    }
}
