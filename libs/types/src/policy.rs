//! Static role-based authorization policy
//!
//! A total mapping from (role, action) to allow/deny. Both enumerations are
//! closed, so the table is an exhaustive `match` the compiler keeps honest:
//! adding a role or action without extending the table is a build error, not
//! a silent deny (or worse, a silent allow).
//!
//! Every mutating request handler consults this table before touching the
//! store. UI-side hiding of buttons is a convenience, never the boundary.

use crate::role::Role;

/// Categories of action a request may attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ReadAny,
    CreateApplication,
    UpdateApplication,
    DeleteApplication,
    CreateFinding,
    UpdateFinding,
    DeleteFinding,
    CreateRisk,
    UpdateRisk,
    DeleteRisk,
    ManageUsers,
    UploadEvidence,
    DeleteEvidence,
}

impl Action {
    /// Every action, for exhaustive iteration in tests
    pub const ALL: [Action; 13] = [
        Action::ReadAny,
        Action::CreateApplication,
        Action::UpdateApplication,
        Action::DeleteApplication,
        Action::CreateFinding,
        Action::UpdateFinding,
        Action::DeleteFinding,
        Action::CreateRisk,
        Action::UpdateRisk,
        Action::DeleteRisk,
        Action::ManageUsers,
        Action::UploadEvidence,
        Action::DeleteEvidence,
    ];
}

/// Decide whether `role` may perform `action`.
///
/// Deterministic and total. Destructive operations (deletes, user
/// management) are reserved for `Admin`; evidence upload is restricted to
/// the roles that may create findings.
pub fn is_allowed(role: Role, action: Action) -> bool {
    use Action::*;

    match action {
        ReadAny => true,
        CreateApplication | UpdateApplication | CreateFinding | CreateRisk | UpdateRisk
        | UploadEvidence | DeleteEvidence => {
            matches!(role, Role::Admin | Role::SecurityAnalyst)
        }
        UpdateFinding => matches!(role, Role::Admin | Role::SecurityAnalyst | Role::Developer),
        DeleteApplication | DeleteFinding | DeleteRisk | ManageUsers => {
            matches!(role, Role::Admin)
        }
    }
}
