use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, Role, User};

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Every appointment, earliest `datetime` first.
    async fn list(&self) -> anyhow::Result<Vec<Appointment>>;

    async fn find(&self, id: &str) -> anyhow::Result<Option<Appointment>>;

    /// Stores a new PENDING appointment with a fresh id.
    async fn create(&self, new: NewAppointment) -> anyhow::Result<Appointment>;

    /// Merges `patch` into the stored record. `None` if the id is unknown.
    async fn update(&self, id: &str, patch: AppointmentPatch)
        -> anyhow::Result<Option<Appointment>>;

    /// `false` if there was nothing to delete.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find(&self, id: &str) -> anyhow::Result<Option<User>>;

    async fn create(&self, email: &str, password_hash: &str, role: Role) -> anyhow::Result<User>;
}

/// Both repositories over one shared SQLite connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection mutex poisoned"))
    }
}

#[async_trait]
impl AppointmentRepository for SqliteStore {
    async fn list(&self) -> anyhow::Result<Vec<Appointment>> {
        let db = self.lock()?;
        queries::list_appointments(&db)
    }

    async fn find(&self, id: &str) -> anyhow::Result<Option<Appointment>> {
        let db = self.lock()?;
        queries::get_appointment(&db, id)
    }

    async fn create(&self, new: NewAppointment) -> anyhow::Result<Appointment> {
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            phone: new.phone,
            service: new.service,
            // stored with millisecond precision
            datetime: new.datetime.trunc_subsecs(3),
            status: AppointmentStatus::Pending,
            created_at: Utc::now().trunc_subsecs(3),
        };

        let db = self.lock()?;
        queries::insert_appointment(&db, &appointment)?;
        Ok(appointment)
    }

    async fn update(
        &self,
        id: &str,
        patch: AppointmentPatch,
    ) -> anyhow::Result<Option<Appointment>> {
        let db = self.lock()?;
        let Some(mut appointment) = queries::get_appointment(&db, id)? else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(appointment));
        }

        appointment.apply(patch);
        if !queries::save_appointment(&db, &appointment)? {
            return Ok(None);
        }
        Ok(Some(appointment))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let db = self.lock()?;
        queries::delete_appointment(&db, id)
    }
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let db = self.lock()?;
        queries::get_user_by_email(&db, email)
    }

    async fn find(&self, id: &str) -> anyhow::Result<Option<User>> {
        let db = self.lock()?;
        queries::get_user(&db, id)
    }

    async fn create(&self, email: &str, password_hash: &str, role: Role) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now().trunc_subsecs(3),
        };

        let db = self.lock()?;
        queries::insert_user(&db, &user)?;
        Ok(user)
    }
}
