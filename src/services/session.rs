//! Admin session tokens: HS256 JWTs carried in the session cookie or a
//! bearer header.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::Role;

pub const SESSION_COOKIE: &str = "salon_session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "sub")]
    pub user_id: String,
    pub role: Role,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("malformed session token")]
    Malformed,
    #[error("bad session signature")]
    BadSignature,
    #[error("session expired")]
    Expired,
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn sign(&self, user_id: &str, role: Role, now: DateTime<Utc>) -> anyhow::Result<String> {
        let claims = SessionClaims {
            user_id: user_id.to_string(),
            role,
            expires_at: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        tracing::debug!(user_id = %user_id, role = role.as_str(), "session signed");
        Ok(token)
    }

    /// Expiry is checked against `now` rather than the system clock.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => SessionError::BadSignature,
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::Malformed,
            })?
            .claims;

        if claims.expires_at <= now.timestamp() {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }
}

/// Pulls the session token from `Cookie` or, failing that, a bearer header.
pub fn token_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(axum::http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
    })
}

pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_seconds}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", 24)
    }

    #[test]
    fn test_sign_and_verify() {
        let now = Utc::now();
        let token = keys().sign("user-1", Role::Admin, now).unwrap();
        let claims = keys().verify(&token, now).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.expires_at, (now + Duration::hours(24)).timestamp());
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now();
        let token = keys().sign("user-1", Role::Admin, now).unwrap();
        let later = now + Duration::hours(25);
        assert_eq!(keys().verify(&token, later), Err(SessionError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let now = Utc::now();
        let token = keys().sign("user-1", Role::Admin, now).unwrap();
        let other = SessionKeys::new("another-secret", 24);
        assert_eq!(other.verify(&token, now), Err(SessionError::BadSignature));
    }

    #[test]
    fn test_tampered_payload() {
        let now = Utc::now();
        let user_token = keys().sign("user-1", Role::User, now).unwrap();
        let admin_token = SessionKeys::new("attacker", 24)
            .sign("user-1", Role::Admin, now)
            .unwrap();

        // admin claims under the user token's signature
        let (admin_body, _) = admin_token.rsplit_once('.').unwrap();
        let (_, user_sig) = user_token.rsplit_once('.').unwrap();
        let forged = format!("{admin_body}.{user_sig}");
        assert_eq!(keys().verify(&forged, now), Err(SessionError::BadSignature));
    }

    #[test]
    fn test_garbage() {
        let now = Utc::now();
        assert_eq!(keys().verify("", now), Err(SessionError::Malformed));
        assert_eq!(keys().verify("abc", now), Err(SessionError::Malformed));
        assert_eq!(keys().verify("!!.??", now), Err(SessionError::Malformed));
    }

    #[test]
    fn test_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("theme=dark; salon_session=abc.def.ghi; other=1"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }
}
