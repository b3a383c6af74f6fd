//! Wire request/response shapes
//!
//! Field names follow the frontend's camelCase contract. Derived fields
//! (severity, risk score, rating, level) are deliberately absent from the
//! request types: the service recomputes them and never trusts the caller.

use serde::{Deserialize, Serialize};
use types::application::{Application, ApplicationPosture, Environment};
use types::errors::DomainError;
use types::finding::FindingStatus;
use types::ids::UserId;
use types::role::Role;
use types::scoring::Severity;
use types::user::UserSummary;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub app_id: String,
    pub name: String,
    pub owner: String,
    pub environment: Environment,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub name: String,
    pub owner: String,
    pub environment: Environment,
    #[serde(default)]
    pub description: String,
}

/// Application plus its posture, derived fresh from the finding set
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub application: Application,
    #[serde(flatten)]
    pub posture: ApplicationPosture,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFindingRequest {
    pub finding_id: String,
    pub app_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    pub cvss_score: f64,
    #[serde(default)]
    pub owasp_category: String,
    #[serde(default)]
    pub mitre_attack: Option<String>,
    pub status: FindingStatus,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub reported_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub remediation_steps: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFindingRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    pub cvss_score: f64,
    #[serde(default)]
    pub owasp_category: String,
    #[serde(default)]
    pub mitre_attack: Option<String>,
    pub status: FindingStatus,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub reported_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub remediation_steps: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRiskRequest {
    pub risk_id: String,
    #[serde(default)]
    pub related_finding_id: Option<String>,
    #[serde(default)]
    pub business_impact: String,
    pub likelihood: u8,
    pub impact: u8,
    #[serde(default)]
    pub risk_owner: String,
    #[serde(default)]
    pub mitigation_plan: String,
    pub status: FindingStatus,
    #[serde(default)]
    pub target_closure_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiskRequest {
    #[serde(default)]
    pub related_finding_id: Option<String>,
    #[serde(default)]
    pub business_impact: String,
    pub likelihood: u8,
    pub impact: u8,
    #[serde(default)]
    pub risk_owner: String,
    #[serde(default)]
    pub mitigation_plan: String,
    pub status: FindingStatus,
    #[serde(default)]
    pub target_closure_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub body: String,
    #[serde(default)]
    pub attachment_path: Option<String>,
    #[serde(default)]
    pub attachment_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_name: String,
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: FindingStatus,
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: u64,
    pub open: u64,
    pub overdue: u64,
    pub severity_stats: Vec<SeverityCount>,
    pub status_stats: Vec<StatusCount>,
}

/// CVSS scores live on the 0.0..=10.0 scale
pub fn validate_cvss(score: f64) -> Result<(), DomainError> {
    if score.is_nan() || !(0.0..=10.0).contains(&score) {
        return Err(DomainError::invalid(
            "cvssScore",
            format!("must be within [0.0, 10.0], got {score}"),
        ));
    }
    Ok(())
}

/// Likelihood and impact live on the 1..=5 matrix scale
pub fn validate_scale(field: &'static str, value: u8) -> Result<(), DomainError> {
    if !(1..=5).contains(&value) {
        return Err(DomainError::invalid(
            field,
            format!("must be within [1, 5], got {value}"),
        ));
    }
    Ok(())
}

/// External identifiers and other required text fields must be non-blank
pub fn validate_required(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(field, "must not be empty"));
    }
    Ok(())
}
