use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{MessageResponse, UploadResponse};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Utc;
use types::errors::DomainError;
use types::evidence::Evidence;
use types::ids::{EvidenceId, FindingId};
use types::policy::Action;

pub async fn list_for_finding(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<FindingId>,
) -> Result<Json<Vec<Evidence>>, ApiError> {
    user.require(Action::ReadAny)?;
    Ok(Json(state.store.evidence_for_finding(id).await?))
}

pub async fn upload(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<FindingId>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    user.require(Action::UploadEvidence)?;

    let finding = state
        .store
        .get_finding(id)
        .await?
        .ok_or_else(|| DomainError::not_found("finding", id))?;

    // First file field wins; the frontend sends a single "evidence" part
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::invalid("evidence", e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::invalid("evidence", e.to_string()))?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) =
        upload.ok_or_else(|| DomainError::invalid("evidence", "no file uploaded"))?;

    let saved = state.files.save(&file_name, &bytes).await?;
    let record = Evidence {
        id: EvidenceId::new(),
        finding_id: finding.id,
        file_name,
        file_path: saved.public_path.clone(),
        uploaded_at: Utc::now(),
    };

    // File and record succeed or fail together; on a failed insert the file
    // is rolled back so no orphan artifact remains
    if let Err(e) = state.store.add_evidence(&record).await {
        if let Err(cleanup) = state.files.delete(&saved.public_path).await {
            tracing::warn!(path = %saved.public_path, error = %cleanup, "orphaned upload left behind");
        }
        return Err(e.into());
    }

    tracing::info!(
        finding_id = %finding.finding_id,
        file = %record.file_name,
        by = %user.email,
        "evidence uploaded"
    );
    Ok(Json(UploadResponse {
        message: "File uploaded".into(),
        file_name: record.file_name,
        file_path: record.file_path,
    }))
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<EvidenceId>,
) -> Result<Json<MessageResponse>, ApiError> {
    user.require(Action::DeleteEvidence)?;

    let record = state
        .store
        .get_evidence(id)
        .await?
        .ok_or_else(|| DomainError::not_found("evidence", id))?;
    state.store.delete_evidence(id).await?;
    if let Err(e) = state.files.delete(&record.file_path).await {
        // Record row is already gone; the leftover file is logged, not fatal
        tracing::warn!(%id, path = %record.file_path, error = %e, "failed to remove evidence file");
    }

    tracing::info!(%id, by = %user.email, "evidence deleted");
    Ok(Json(MessageResponse::new("Evidence deleted")))
}
