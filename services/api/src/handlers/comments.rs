use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{validate_required, CreateCommentRequest};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use types::errors::DomainError;
use types::evidence::Comment;
use types::ids::{CommentId, FindingId};
use types::policy::Action;

pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<FindingId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    user.require(Action::ReadAny)?;
    Ok(Json(state.store.comments_for_finding(id).await?))
}

/// Discussion is open to every authenticated role; the thread is append-only
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<FindingId>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    validate_required("body", &payload.body)?;

    let finding = state
        .store
        .get_finding(id)
        .await?
        .ok_or_else(|| DomainError::not_found("finding", id))?;

    let comment = Comment {
        id: CommentId::new(),
        finding_id: finding.id,
        author_id: user.id,
        author_name: user.name.clone(),
        body: payload.body,
        attachment_path: payload.attachment_path,
        attachment_type: payload.attachment_type,
        created_at: Utc::now(),
    };
    state.store.add_comment(&comment).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
