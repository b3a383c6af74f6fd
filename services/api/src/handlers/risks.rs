use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    CreateRiskRequest, MessageResponse, UpdateRiskRequest, validate_required, validate_scale,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use types::errors::DomainError;
use types::ids::RiskId;
use types::policy::Action;
use types::risk::RiskEntry;
use types::scoring::RiskLevel;

pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<RiskEntry>>, ApiError> {
    user.require(Action::ReadAny)?;
    Ok(Json(state.store.list_risks().await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateRiskRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    user.require(Action::CreateRisk)?;
    validate_required("riskId", &payload.risk_id)?;
    validate_scale("likelihood", payload.likelihood)?;
    validate_scale("impact", payload.impact)?;

    // Rating and level come from likelihood x impact; rescore() fills them
    let mut risk = RiskEntry {
        id: RiskId::new(),
        risk_id: payload.risk_id,
        related_finding_id: payload.related_finding_id,
        business_impact: payload.business_impact,
        likelihood: payload.likelihood,
        impact: payload.impact,
        risk_rating: 0,
        risk_level: RiskLevel::Low,
        risk_owner: payload.risk_owner,
        mitigation_plan: payload.mitigation_plan,
        status: payload.status,
        target_closure_date: payload.target_closure_date,
    };
    risk.rescore();
    state.store.create_risk(&risk).await?;

    tracing::info!(risk_id = %risk.risk_id, level = %risk.risk_level, by = %user.email, "risk created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Risk created")),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<RiskId>,
    Json(payload): Json<UpdateRiskRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::UpdateRisk)?;
    validate_scale("likelihood", payload.likelihood)?;
    validate_scale("impact", payload.impact)?;

    let mut risk = state
        .store
        .get_risk(id)
        .await?
        .ok_or_else(|| DomainError::not_found("risk", id))?;
    risk.related_finding_id = payload.related_finding_id;
    risk.business_impact = payload.business_impact;
    risk.likelihood = payload.likelihood;
    risk.impact = payload.impact;
    risk.risk_owner = payload.risk_owner;
    risk.mitigation_plan = payload.mitigation_plan;
    risk.status = payload.status;
    risk.target_closure_date = payload.target_closure_date;
    risk.rescore();
    state.store.update_risk(&risk).await?;

    Ok(Json(MessageResponse::new("Risk updated")))
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<RiskId>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::DeleteRisk)?;

    state.store.delete_risk(id).await?;
    tracing::info!(%id, by = %user.email, "risk deleted");
    Ok(Json(MessageResponse::new("Risk deleted")))
}
