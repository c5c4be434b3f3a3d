use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, ResultExt};
use crate::handlers::extract::{AdminSession, ApiJson};
use crate::messages;
use crate::models::{Role, User};
use crate::services::auth::{login as check_login, LoginOutcome};
use crate::services::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct PublicUser {
    id: String,
    email: String,
    role: Role,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role,
        }
    }
}

#[derive(Serialize)]
pub struct SessionResponse {
    user: PublicUser,
}

// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Response, AppError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(messages::MISSING_FIELDS));
    }

    let outcome = check_login(
        &*state.users,
        &state.sessions,
        &body.email,
        &body.password,
    )
    .await
    .or_internal(messages::LOGIN_FAILED)?;

    match outcome {
        LoginOutcome::Success { user, token } => {
            let cookie = session_cookie(&token, state.sessions.ttl_seconds());
            Ok((
                [(header::SET_COOKIE, cookie)],
                Json(SessionResponse { user: user.into() }),
            )
                .into_response())
        }
        LoginOutcome::InvalidCredentials => {
            Err(AppError::Unauthorized(messages::INVALID_CREDENTIALS))
        }
    }
}

// POST /api/auth/logout
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "message": messages::LOGGED_OUT })),
    )
        .into_response()
}

// GET /api/auth/session
pub async fn current_session(
    State(state): State<Arc<AppState>>,
    AdminSession(claims): AdminSession,
) -> Result<Json<SessionResponse>, AppError> {
    let user = state
        .users
        .find(&claims.user_id)
        .await
        .or_internal(messages::LOGIN_FAILED)?
        .ok_or(AppError::Unauthorized(messages::UNAUTHORIZED))?;

    Ok(Json(SessionResponse { user: user.into() }))
}
