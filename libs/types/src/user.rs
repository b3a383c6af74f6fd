//! Account types

use crate::ids::UserId;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// A system account as held by the credential store.
///
/// Carries the password hash, so this type never crosses the wire; responses
/// use [`UserSummary`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    /// Wire-safe view of the account, without the password hash
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Account view exposed in API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}
