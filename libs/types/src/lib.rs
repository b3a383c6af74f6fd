//! Types library for the VAPT tracker
//!
//! This library provides the domain model shared across the tracker: entity
//! definitions, identifier newtypes, the severity/risk scoring functions, and
//! the role-based authorization policy. Everything here is pure and
//! persistence-free so the policy core can be tested without a live store.
//!
//! # Modules
//! - `ids`: Unique identifiers (UserId, ApplicationId, FindingId, ...)
//! - `scoring`: Severity and risk derivation functions
//! - `role`: Closed role enumeration
//! - `policy`: Static (role, action) permission table
//! - `user`: Account types
//! - `application`: Applications under assessment and derived risk posture
//! - `finding`: Vulnerability findings and lifecycle status
//! - `risk`: Risk register entries
//! - `evidence`: Evidence attachments and discussion comments
//! - `errors`: Domain error taxonomy

pub mod application;
pub mod errors;
pub mod evidence;
pub mod finding;
pub mod ids;
pub mod policy;
pub mod risk;
pub mod role;
pub mod scoring;
pub mod user;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::*;
    pub use crate::errors::*;
    pub use crate::evidence::*;
    pub use crate::finding::*;
    pub use crate::ids::*;
    pub use crate::policy::*;
    pub use crate::risk::*;
    pub use crate::role::*;
    pub use crate::scoring::*;
    pub use crate::user::*;
}
