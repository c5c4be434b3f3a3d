pub mod appointment;
pub mod booking_form;
pub mod service;
pub mod user;

pub use appointment::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
pub use booking_form::{BookingFormState, BookingFormValues, FormEvent, FormField};
pub use service::{find_service, format_price, SalonService, SERVICES};
pub use user::{Role, User};
