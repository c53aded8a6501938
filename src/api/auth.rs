use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::form::EntityForm;
use super::validation::{Validate, ValidationError};
use super::{ApiError, AppState};
use crate::constants::session::USER_ID_KEY;
use crate::models::{User, UserInfo};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Length rules live in `AuthService::register`; login accepts anything.
impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

const INVALID_USER: &str = "Invalid user data";

// ============================================================================
// Middleware
// ============================================================================

/// Lets the request through only when the session names a user that still
/// exists. Everything else is a plain-text 401 and the handler never runs.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = session_user(&state, &session)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    tracing::Span::current().record("user_id", user.id);
    Ok(next.run(request).await)
}

async fn session_user(state: &AppState, session: &Session) -> Result<Option<User>, ApiError> {
    let user_id = session
        .get::<i32>(USER_ID_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read session: {e}")))?;

    match user_id {
        Some(id) => Ok(state.auth.find_user(id).await?),
        None => Ok(None),
    }
}

async fn start_session(session: &Session, user: &User) -> Result<(), ApiError> {
    // New id on every login so a pre-login cookie cannot be reused.
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(USER_ID_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: EntityForm,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    if !state.config.auth.allow_registration {
        return Err(ApiError::Forbidden("Registration is disabled".to_string()));
    }
    let payload: Credentials = form.parse(INVALID_USER)?;

    let user = state
        .auth
        .register(&payload.username, &payload.password)
        .await?;
    start_session(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(UserInfo::from(&user))))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: EntityForm,
) -> Result<Json<UserInfo>, ApiError> {
    let payload: Credentials = form.parse(INVALID_USER)?;
    let user = state
        .auth
        .login(&payload.username, &payload.password)
        .await
        .inspect_err(|_| tracing::info!(username = %payload.username, "Failed login attempt"))?;
    start_session(&session, &user).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(UserInfo::from(&user)))
}

/// POST /logout
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to flush session on logout");
    }
    StatusCode::OK
}

/// GET /user
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<UserInfo>, ApiError> {
    let user = session_user(&state, &session)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(UserInfo::from(&user)))
}
