use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    CreateFindingRequest, MessageResponse, UpdateFindingRequest, validate_cvss, validate_required,
};
use crate::state::AppState;
use crate::store::FindingRecord;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use types::errors::DomainError;
use types::finding::Finding;
use types::ids::FindingId;
use types::policy::Action;
use types::scoring::Severity;

pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<FindingRecord>>, ApiError> {
    user.require(Action::ReadAny)?;
    Ok(Json(state.store.list_findings().await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateFindingRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    user.require(Action::CreateFinding)?;
    validate_required("findingId", &payload.finding_id)?;
    validate_required("appId", &payload.app_id)?;
    validate_required("title", &payload.title)?;
    validate_cvss(payload.cvss_score)?;

    // Severity and risk score come from the score alone; rescore() fills them
    let mut finding = Finding {
        id: FindingId::new(),
        finding_id: payload.finding_id,
        app_id: payload.app_id,
        title: payload.title,
        description: payload.description,
        impact: payload.impact,
        cvss_score: payload.cvss_score,
        severity: Severity::Informational,
        owasp_category: payload.owasp_category,
        mitre_attack: payload.mitre_attack,
        status: payload.status,
        assigned_to: payload.assigned_to,
        reported_date: payload.reported_date,
        due_date: payload.due_date,
        remediation_steps: payload.remediation_steps,
        risk_score: 0.0,
    };
    finding.rescore();
    state.store.create_finding(&finding).await?;

    tracing::info!(
        finding_id = %finding.finding_id,
        severity = %finding.severity,
        by = %user.email,
        "finding created"
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Finding created")),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<FindingId>,
    Json(payload): Json<UpdateFindingRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::UpdateFinding)?;
    validate_required("title", &payload.title)?;
    validate_cvss(payload.cvss_score)?;

    let mut finding = state
        .store
        .get_finding(id)
        .await?
        .ok_or_else(|| DomainError::not_found("finding", id))?;
    finding.title = payload.title;
    finding.description = payload.description;
    finding.impact = payload.impact;
    finding.cvss_score = payload.cvss_score;
    finding.owasp_category = payload.owasp_category;
    finding.mitre_attack = payload.mitre_attack;
    finding.status = payload.status;
    finding.assigned_to = payload.assigned_to;
    finding.reported_date = payload.reported_date;
    finding.due_date = payload.due_date;
    finding.remediation_steps = payload.remediation_steps;
    finding.rescore();
    state.store.update_finding(&finding).await?;

    Ok(Json(MessageResponse::new("Finding updated")))
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<FindingId>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::DeleteFinding)?;

    let orphaned_files = state.store.delete_finding(id).await?;
    for path in orphaned_files {
        if let Err(e) = state.files.delete(&path).await {
            // Record row is already gone; the leftover file is logged, not fatal
            tracing::warn!(%path, error = %e, "failed to remove evidence file");
        }
    }

    tracing::info!(%id, by = %user.email, "finding deleted");
    Ok(Json(MessageResponse::new("Finding deleted")))
}
