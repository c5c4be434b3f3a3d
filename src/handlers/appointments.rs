use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{AppError, ResultExt};
use crate::handlers::extract::ApiJson;
use crate::messages;
use crate::models::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
use crate::state::AppState;
use crate::validation::{is_in_future, is_truthy, is_valid_phone, parse_datetime, required_text};

// Fields arrive as raw JSON so a wrong type is reported as a field error
// rather than a body rejection.

#[derive(Debug, Default, Deserialize)]
pub struct CreateAppointmentRequest {
    pub name: Option<Value>,
    pub phone: Option<Value>,
    pub service: Option<Value>,
    pub datetime: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub name: Option<Value>,
    pub phone: Option<Value>,
    pub service: Option<Value>,
    pub datetime: Option<Value>,
    pub status: Option<Value>,
}

impl CreateAppointmentRequest {
    pub fn validate(
        &self,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<NewAppointment, AppError> {
        let (Some(name), Some(phone), Some(service), Some(datetime)) = (
            required_text(self.name.as_ref()),
            required_text(self.phone.as_ref()),
            required_text(self.service.as_ref()),
            required_text(self.datetime.as_ref()),
        ) else {
            return Err(AppError::Validation(messages::MISSING_FIELDS));
        };

        if !is_valid_phone(phone) {
            return Err(AppError::Validation(messages::INVALID_PHONE));
        }

        let datetime =
            parse_datetime(datetime, offset).ok_or(AppError::Validation(messages::INVALID_DATETIME))?;
        if !is_in_future(datetime, now) {
            return Err(AppError::Validation(messages::DATETIME_NOT_FUTURE));
        }

        Ok(NewAppointment {
            name: name.to_string(),
            phone: phone.to_string(),
            service: service.to_string(),
            datetime,
        })
    }
}

/// A truthy value that must be a string.
fn truthy_text<'a>(value: Option<&'a Value>, err: &'static str) -> Result<Option<&'a str>, AppError> {
    match value {
        Some(v) if is_truthy(v) => v.as_str().map(Some).ok_or(AppError::Validation(err)),
        _ => Ok(None),
    }
}

impl UpdateAppointmentRequest {
    /// Falsy fields are left out of the patch. `service` and `status` are
    /// stored as given.
    pub fn validate(&self, offset: FixedOffset) -> Result<AppointmentPatch, AppError> {
        let name = truthy_text(self.name.as_ref(), messages::INVALID_NAME)?;

        let phone = truthy_text(self.phone.as_ref(), messages::INVALID_PHONE)?;
        if let Some(phone) = phone {
            if !is_valid_phone(phone) {
                return Err(AppError::Validation(messages::INVALID_PHONE));
            }
        }

        let service = truthy_text(self.service.as_ref(), messages::INVALID_SERVICE)?;

        let datetime = truthy_text(self.datetime.as_ref(), messages::INVALID_DATETIME)?
            .map(|raw| {
                parse_datetime(raw, offset).ok_or(AppError::Validation(messages::INVALID_DATETIME))
            })
            .transpose()?;

        let status = truthy_text(self.status.as_ref(), messages::INVALID_STATUS)?;

        Ok(AppointmentPatch {
            name: name.map(str::to_string),
            phone: phone.map(str::to_string),
            service: service.map(str::to_string),
            datetime,
            status: status.map(AppointmentStatus::parse),
        })
    }
}

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state.appointments.list().await.or_internal(messages::LIST_FAILED)?;
    Ok(Json(appointments))
}

// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    state
        .appointments
        .find(&id)
        .await
        .or_internal(messages::GET_FAILED)?
        .map(Json)
        .ok_or(AppError::NotFound(messages::NOT_FOUND))
}

// POST /api/appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let new = body.validate(Utc::now(), state.config.salon_offset())?;

    let appointment = state
        .appointments
        .create(new)
        .await
        .or_internal(messages::CREATE_FAILED)?;

    tracing::info!(
        id = %appointment.id,
        service = %appointment.service,
        datetime = %appointment.datetime,
        "appointment created"
    );
    Ok((StatusCode::CREATED, Json(appointment)))
}

// PUT /api/appointments/:id
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let exists = state
        .appointments
        .find(&id)
        .await
        .or_internal(messages::UPDATE_FAILED)?
        .is_some();
    if !exists {
        return Err(AppError::NotFound(messages::NOT_FOUND));
    }

    let patch = body.validate(state.config.salon_offset())?;

    let appointment = state
        .appointments
        .update(&id, patch)
        .await
        .or_internal(messages::UPDATE_FAILED)?
        .ok_or(AppError::NotFound(messages::NOT_FOUND))?;

    tracing::info!(id = %appointment.id, status = appointment.status.as_str(), "appointment updated");
    Ok(Json(appointment))
}

// DELETE /api/appointments/:id
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = state
        .appointments
        .delete(&id)
        .await
        .or_internal(messages::DELETE_FAILED)?;

    if !removed {
        return Err(AppError::NotFound(messages::NOT_FOUND));
    }

    tracing::info!(id = %id, "appointment deleted");
    Ok(Json(serde_json::json!({ "message": messages::DELETED })))
}
