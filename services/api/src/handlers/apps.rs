use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{
    ApplicationResponse, CreateApplicationRequest, MessageResponse, UpdateApplicationRequest,
    validate_required,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use types::application::{Application, ApplicationPosture};
use types::errors::DomainError;
use types::finding::Finding;
use types::ids::ApplicationId;
use types::policy::Action;

pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    user.require(Action::ReadAny)?;

    let apps = state.store.list_applications().await?;
    let findings = state.store.list_findings().await?;
    let mut by_app: HashMap<&str, Vec<&Finding>> = HashMap::new();
    for record in &findings {
        by_app
            .entry(record.finding.app_id.as_str())
            .or_default()
            .push(&record.finding);
    }

    let out = apps
        .into_iter()
        .map(|application| {
            let posture = ApplicationPosture::derive(
                by_app
                    .get(application.app_id.as_str())
                    .into_iter()
                    .flatten()
                    .copied(),
            );
            ApplicationResponse {
                application,
                posture,
            }
        })
        .collect();
    Ok(Json(out))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    user.require(Action::CreateApplication)?;
    validate_required("appId", &payload.app_id)?;
    validate_required("name", &payload.name)?;

    let application = Application {
        id: ApplicationId::new(),
        app_id: payload.app_id,
        name: payload.name,
        owner: payload.owner,
        environment: payload.environment,
        description: payload.description,
    };
    state.store.create_application(&application).await?;

    tracing::info!(app_id = %application.app_id, by = %user.email, "application created");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("App created"))))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<ApplicationId>,
    Json(payload): Json<UpdateApplicationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::UpdateApplication)?;
    validate_required("name", &payload.name)?;

    let mut application = state
        .store
        .get_application(id)
        .await?
        .ok_or_else(|| DomainError::not_found("application", id))?;
    application.name = payload.name;
    application.owner = payload.owner;
    application.environment = payload.environment;
    application.description = payload.description;
    state.store.update_application(&application).await?;

    Ok(Json(MessageResponse::new("App updated")))
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<ApplicationId>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::DeleteApplication)?;

    state.store.delete_application(id).await?;
    tracing::info!(%id, by = %user.email, "application deleted");
    Ok(Json(MessageResponse::new("App deleted")))
}
