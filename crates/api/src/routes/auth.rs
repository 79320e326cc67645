//! Authentication routes.

use axum::{Json, Router, extract::State, routing::post};
use hotelres_core::auth::Role;
use hotelres_db::ServiceError;
use hotelres_shared::AppError;
use hotelres_shared::auth::{LoginRequest, LoginResponse};
use tracing::info;

use crate::{ApiError, AppState};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Authenticate a user and return an access token.
///
/// The token carries the user's most privileged role; users without any role
/// are customers.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .identity
        .verify_credentials(&payload.email, &payload.password)
        .await
        .map_err(ServiceError::from)?;

    let Some(user) = user else {
        info!(email = %payload.email, "Failed login attempt");
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    let roles = state
        .identity
        .roles_of(user.id)
        .await
        .map_err(ServiceError::from)?;
    let role = roles.first().copied().unwrap_or(Role::Customer);

    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email, role.as_str())
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    info!(user_id = %user.id, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        email: user.email,
        role: role.as_str().to_string(),
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}
