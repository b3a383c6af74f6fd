use crate::auth;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::state::AppState;
use axum::{extract::State, Json};

/// Login attempts allowed per email before the bucket runs dry
const LOGIN_BURST: u32 = 10;
/// Refill rate in attempts per second
const LOGIN_REFILL: f64 = 0.2;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .login_limiter
        .check(&format!("login:{}", payload.email), LOGIN_BURST, LOGIN_REFILL)?;

    let user = auth::authenticate(state.store.as_ref(), &payload.email, &payload.password).await?;
    let token = state.keys.issue(&user)?;

    tracing::info!(email = %user.email, role = %user.role, "login succeeded");
    Ok(Json(LoginResponse {
        token,
        user: user.summary(),
    }))
}
