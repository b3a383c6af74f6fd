//! Persistence ports
//!
//! The request handlers only ever talk to the [`Store`] trait, so the policy
//! and scoring core is testable against [`MemoryStore`] while production runs
//! on [`SqliteStore`]. Each method is a single logical unit: a rejected or
//! failed call leaves no partial state behind.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::Serialize;
use types::application::Application;
use types::errors::DomainError;
use types::evidence::{Comment, Evidence};
use types::finding::Finding;
use types::ids::{ApplicationId, EvidenceId, FindingId, RiskId};
use types::risk::RiskEntry;
use types::user::User;

/// A finding joined with its application's display name, as listed in the UI
#[derive(Debug, Clone, Serialize)]
pub struct FindingRecord {
    #[serde(flatten)]
    pub finding: Finding,
    #[serde(rename = "appName")]
    pub app_name: String,
}

/// Relational store port.
///
/// Create operations enforce uniqueness of the external identifiers
/// (`appId`, `findingId`, `riskId`, user email) and surface violations as
/// [`DomainError::Conflict`]. Updates and deletes address entities by their
/// internal id and report [`DomainError::NotFound`] for absent rows.
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn create_user(&self, user: &User) -> Result<(), DomainError>;
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn count_users(&self) -> Result<u64, DomainError>;

    // Applications
    async fn create_application(&self, app: &Application) -> Result<(), DomainError>;
    async fn list_applications(&self) -> Result<Vec<Application>, DomainError>;
    async fn get_application(&self, id: ApplicationId) -> Result<Option<Application>, DomainError>;
    async fn update_application(&self, app: &Application) -> Result<(), DomainError>;
    /// Rejects with [`DomainError::Referenced`] while findings still point at
    /// the application; cascade was deliberately not chosen here
    async fn delete_application(&self, id: ApplicationId) -> Result<(), DomainError>;

    // Findings
    async fn create_finding(&self, finding: &Finding) -> Result<(), DomainError>;
    async fn list_findings(&self) -> Result<Vec<FindingRecord>, DomainError>;
    async fn get_finding(&self, id: FindingId) -> Result<Option<Finding>, DomainError>;
    async fn update_finding(&self, finding: &Finding) -> Result<(), DomainError>;
    /// Cascades the finding's evidence records and comments; returns the
    /// public paths of removed evidence so the caller can delete the files
    async fn delete_finding(&self, id: FindingId) -> Result<Vec<String>, DomainError>;

    // Risk register
    async fn create_risk(&self, risk: &RiskEntry) -> Result<(), DomainError>;
    async fn list_risks(&self) -> Result<Vec<RiskEntry>, DomainError>;
    async fn get_risk(&self, id: RiskId) -> Result<Option<RiskEntry>, DomainError>;
    async fn update_risk(&self, risk: &RiskEntry) -> Result<(), DomainError>;
    async fn delete_risk(&self, id: RiskId) -> Result<(), DomainError>;

    // Evidence
    async fn add_evidence(&self, evidence: &Evidence) -> Result<(), DomainError>;
    async fn evidence_for_finding(&self, finding: FindingId)
        -> Result<Vec<Evidence>, DomainError>;
    async fn get_evidence(&self, id: EvidenceId) -> Result<Option<Evidence>, DomainError>;
    async fn delete_evidence(&self, id: EvidenceId) -> Result<(), DomainError>;

    // Comments
    async fn add_comment(&self, comment: &Comment) -> Result<(), DomainError>;
    async fn comments_for_finding(&self, finding: FindingId)
        -> Result<Vec<Comment>, DomainError>;
}
