use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{AppointmentRepository, SqliteStore, UserRepository};
use crate::services::session::SessionKeys;

pub struct AppState {
    pub appointments: Arc<dyn AppointmentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: SessionKeys,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: SqliteStore, config: AppConfig) -> Self {
        let store = Arc::new(store);
        Self {
            appointments: store.clone(),
            users: store,
            sessions: SessionKeys::new(&config.session_secret, config.session_ttl_hours),
            config,
        }
    }
}
