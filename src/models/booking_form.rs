use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::messages;
use crate::models::{find_service, NewAppointment};
use crate::validation::{is_in_future, is_valid_phone, parse_datetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Phone,
    Service,
    Datetime,
}

/// Raw values as typed into the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub datetime: String,
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    Input(FormField, String),
    Submit {
        now: DateTime<Utc>,
        offset: FixedOffset,
    },
    SubmitFailed(&'static str),
}

/// The booking form. Each event produces a new state; nothing is mutated
/// behind the caller's back.
#[derive(Debug, Clone, Default)]
pub struct BookingFormState {
    pub values: BookingFormValues,
    pub errors: BTreeMap<FormField, &'static str>,
    pub alert: Option<&'static str>,
    submitted: Option<NewAppointment>,
}

impl BookingFormState {
    /// Feeds every submitted value through `Input`, the way a user filling
    /// the form would.
    pub fn from_values(values: BookingFormValues) -> Self {
        Self::default()
            .apply(FormEvent::Input(FormField::Name, values.name))
            .apply(FormEvent::Input(FormField::Phone, values.phone))
            .apply(FormEvent::Input(FormField::Service, values.service))
            .apply(FormEvent::Input(FormField::Datetime, values.datetime))
    }

    pub fn apply(self, event: FormEvent) -> Self {
        match event {
            FormEvent::Input(field, value) => {
                let mut next = self;
                match field {
                    FormField::Name => next.values.name = value,
                    FormField::Phone => next.values.phone = value,
                    FormField::Service => next.values.service = value,
                    FormField::Datetime => next.values.datetime = value,
                }
                next.errors.remove(&field);
                next.submitted = None;
                next
            }
            FormEvent::Submit { now, offset } => {
                let (errors, submitted) = validate(&self.values, now, offset);
                Self {
                    errors,
                    alert: None,
                    submitted,
                    ..self
                }
            }
            FormEvent::SubmitFailed(message) => Self {
                alert: Some(message),
                submitted: None,
                ..self
            },
        }
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// The appointment to create, present only after a clean `Submit`.
    pub fn submission(&self) -> Option<&NewAppointment> {
        self.submitted.as_ref()
    }
}

fn validate(
    values: &BookingFormValues,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> (BTreeMap<FormField, &'static str>, Option<NewAppointment>) {
    let mut errors = BTreeMap::new();

    if values.name.trim().is_empty() {
        errors.insert(FormField::Name, messages::FORM_NAME_REQUIRED);
    }

    if values.phone.trim().is_empty() {
        errors.insert(FormField::Phone, messages::FORM_PHONE_REQUIRED);
    } else if !is_valid_phone(&values.phone) {
        errors.insert(FormField::Phone, messages::INVALID_PHONE);
    }

    if find_service(&values.service).is_none() {
        errors.insert(FormField::Service, messages::FORM_SERVICE_REQUIRED);
    }

    let datetime = if values.datetime.trim().is_empty() {
        errors.insert(FormField::Datetime, messages::FORM_DATETIME_REQUIRED);
        None
    } else {
        match parse_datetime(&values.datetime, offset) {
            Some(dt) if is_in_future(dt, now) => Some(dt),
            _ => {
                errors.insert(FormField::Datetime, messages::FORM_DATETIME_NOT_FUTURE);
                None
            }
        }
    };

    let submitted = match datetime {
        Some(datetime) if errors.is_empty() => Some(NewAppointment {
            name: values.name.clone(),
            phone: values.phone.clone(),
            service: values.service.clone(),
            datetime,
        }),
        _ => None,
    };

    (errors, submitted)
}
