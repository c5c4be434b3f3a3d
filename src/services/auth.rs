use chrono::Utc;

use crate::config::AppConfig;
use crate::db::UserRepository;
use crate::models::{Role, User};
use crate::services::password::{hash_password, verify_password};
use crate::services::session::SessionKeys;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Outcome of a credential check. Storage failures stay in the `Err` arm.
pub enum LoginOutcome {
    Success { user: User, token: String },
    InvalidCredentials,
}

pub async fn login(
    users: &dyn UserRepository,
    keys: &SessionKeys,
    email: &str,
    password: &str,
) -> anyhow::Result<LoginOutcome> {
    let email = normalize_email(email);

    let Some(user) = users.find_by_email(&email).await? else {
        tracing::warn!(email = %email, "login unknown email");
        return Ok(LoginOutcome::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(email = %email, user_id = %user.id, "login invalid password");
        return Ok(LoginOutcome::InvalidCredentials);
    }

    let token = keys.sign(&user.id, user.role, Utc::now())?;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user logged in");
    Ok(LoginOutcome::Success { user, token })
}

/// Creates the configured admin account if it does not exist yet.
pub async fn bootstrap_admin(users: &dyn UserRepository, config: &AppConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(());
    };

    let email = normalize_email(email);
    if users.find_by_email(&email).await?.is_some() {
        tracing::debug!(email = %email, "admin account already present");
        return Ok(());
    }

    let hash = hash_password(password)?;
    let user = users.create(&email, &hash, Role::Admin).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "created admin account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, SqliteStore};

    fn config_with_admin(email: Option<&str>, password: Option<&str>) -> AppConfig {
        AppConfig {
            port: 0,
            database_url: ":memory:".to_string(),
            session_secret: "secret".to_string(),
            session_ttl_hours: 1,
            admin_email: email.map(str::to_string),
            admin_password: password.map(str::to_string),
            enforce_api_auth: false,
            utc_offset_minutes: 420,
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Salon.COM "), "admin@salon.com");
    }

    #[tokio::test]
    async fn test_bootstrap_then_login() {
        let store = SqliteStore::new(init_db(":memory:").unwrap());
        let config = config_with_admin(Some("Admin@Salon.com"), Some("admin123"));
        bootstrap_admin(&store, &config).await.unwrap();
        // second run is a no-op
        bootstrap_admin(&store, &config).await.unwrap();

        let keys = SessionKeys::new("secret", 1);
        match login(&store, &keys, "admin@salon.com", "admin123").await.unwrap() {
            LoginOutcome::Success { user, token } => {
                assert_eq!(user.role, Role::Admin);
                let claims = keys.verify(&token, Utc::now()).unwrap();
                assert_eq!(claims.user_id, user.id);
            }
            LoginOutcome::InvalidCredentials => panic!("expected successful login"),
        }

        assert!(matches!(
            login(&store, &keys, "admin@salon.com", "wrong").await.unwrap(),
            LoginOutcome::InvalidCredentials
        ));
        assert!(matches!(
            login(&store, &keys, "nobody@salon.com", "admin123").await.unwrap(),
            LoginOutcome::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_skipped_without_credentials() {
        let store = SqliteStore::new(init_db(":memory:").unwrap());
        bootstrap_admin(&store, &config_with_admin(Some("admin@salon.com"), None))
            .await
            .unwrap();
        assert!(UserRepository::find_by_email(&store, "admin@salon.com")
            .await
            .unwrap()
            .is_none());
    }
}
