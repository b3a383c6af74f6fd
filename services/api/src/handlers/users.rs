use crate::auth::{self, AuthenticatedUser};
use crate::error::ApiError;
use crate::models::{validate_required, CreateUserRequest, MessageResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use types::ids::UserId;
use types::policy::Action;
use types::user::{User, UserSummary};

pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    user.require(Action::ManageUsers)?;

    let users = state.store.list_users().await?;
    Ok(Json(users.iter().map(User::summary).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    user.require(Action::ManageUsers)?;
    validate_required("name", &payload.name)?;
    validate_required("email", &payload.email)?;
    validate_required("password", &payload.password)?;

    let account = User {
        id: UserId::new(),
        name: payload.name,
        email: payload.email,
        password_hash: auth::hash_password(&payload.password)?,
        role: payload.role,
    };
    state.store.create_user(&account).await?;

    tracing::info!(email = %account.email, role = %account.role, by = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created")),
    ))
}
