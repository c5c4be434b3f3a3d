use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub datetime: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when a booking is persisted; id, status and
/// `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub datetime: DateTime<Utc>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.service.is_none()
            && self.datetime.is_none()
            && self.status.is_none()
    }
}

impl Appointment {
    pub fn apply(&mut self, patch: AppointmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(service) = patch.service {
            self.service = service;
        }
        if let Some(datetime) = patch.datetime {
            self.datetime = datetime;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Transitions are unrestricted, and updates may store values outside the
/// four known ones; those round-trip through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "PENDING" => AppointmentStatus::Pending,
            "CONFIRMED" => AppointmentStatus::Confirmed,
            "COMPLETED" => AppointmentStatus::Completed,
            "CANCELLED" => AppointmentStatus::Cancelled,
            other => AppointmentStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        AppointmentStatus::parse(&s)
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Appointment {
        Appointment {
            id: "appt-1".to_string(),
            name: "Nguyễn Văn A".to_string(),
            phone: "0901234567".to_string(),
            service: "cut-male".to_string(),
            datetime: Utc.with_ymd_and_hms(2030, 9, 20, 3, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2030, 9, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_known_values() {
        for s in ["PENDING", "CONFIRMED", "COMPLETED", "CANCELLED"] {
            let status = AppointmentStatus::parse(s);
            assert!(!matches!(status, AppointmentStatus::Other(_)));
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn test_status_keeps_unknown_values() {
        let status = AppointmentStatus::parse("NO_SHOW");
        assert_eq!(status, AppointmentStatus::Other("NO_SHOW".to_string()));
        assert_eq!(status.as_str(), "NO_SHOW");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["service"], "cut-male");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_apply_patch_merges() {
        let mut appt = sample();
        appt.apply(AppointmentPatch {
            status: Some(AppointmentStatus::Completed),
            ..Default::default()
        });
        assert_eq!(appt.status, AppointmentStatus::Completed);
        assert_eq!(appt.name, "Nguyễn Văn A");
        assert_eq!(appt.phone, "0901234567");
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut appt = sample();
        let before = appt.clone();
        let patch = AppointmentPatch::default();
        assert!(patch.is_empty());
        appt.apply(patch);
        assert_eq!(appt, before);
    }

    #[test]
    fn test_cancelled_can_return_to_pending() {
        let mut appt = sample();
        appt.status = AppointmentStatus::Cancelled;
        appt.apply(AppointmentPatch {
            status: Some(AppointmentStatus::Pending),
            ..Default::default()
        });
        assert_eq!(appt.status, AppointmentStatus::Pending);
    }
}
