use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::errors::AppError;
use crate::messages;
use crate::models::Role;
use crate::services::session::{token_from_headers, SessionClaims};
use crate::state::AppState;

/// `Json` whose rejection is a 400 with the usual `{message}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// A verified session belonging to an ADMIN.
pub struct AdminSession(pub SessionClaims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token =
            token_from_headers(&parts.headers).ok_or(AppError::Unauthorized(messages::UNAUTHORIZED))?;

        let claims = state.sessions.verify(&token, Utc::now()).map_err(|e| {
            tracing::warn!(error = %e, "rejected session token");
            AppError::Unauthorized(messages::UNAUTHORIZED)
        })?;

        if claims.role != Role::Admin {
            tracing::warn!(user_id = %claims.user_id, "non-admin session on admin route");
            return Err(AppError::Unauthorized(messages::FORBIDDEN_ROLE));
        }

        Ok(AdminSession(claims))
    }
}

/// Route layer used when `ENFORCE_API_AUTH` is on.
pub async fn require_admin(_admin: AdminSession, request: Request, next: Next) -> Response {
    next.run(request).await
}
