use std::fmt::Write;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;

use crate::handlers::extract::AdminSession;
use crate::messages;
use crate::models::{
    format_price, BookingFormState, BookingFormValues, FormEvent, FormField, SalonService,
    SERVICES,
};
use crate::state::AppState;

static INDEX_HTML: &str = include_str!("../web/index.html");
static BOOKING_HTML: &str = include_str!("../web/booking.html");
static LOGIN_HTML: &str = include_str!("../web/login.html");
static DASHBOARD_HTML: &str = include_str!("../web/dashboard.html");

pub async fn index_page() -> Html<String> {
    let mut cards = String::new();
    for service in SERVICES {
        let _ = write!(
            cards,
            "<li class=\"service\"><span>{}</span><strong>{}</strong></li>",
            escape_html(service.name),
            format_price(service.price_vnd)
        );
    }
    Html(INDEX_HTML.replace("{{services}}", &cards))
}

pub async fn services() -> Json<&'static [SalonService]> {
    Json(SERVICES)
}

pub async fn health() -> &'static str {
    "ok"
}

// ── Booking ──

pub async fn booking_page() -> Html<String> {
    Html(render_booking(&BookingFormState::default()))
}

// POST /booking
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Form(values): Form<BookingFormValues>,
) -> Response {
    let form = BookingFormState::from_values(values).apply(FormEvent::Submit {
        now: Utc::now(),
        offset: state.config.salon_offset(),
    });

    let Some(new) = form.submission().cloned() else {
        tracing::debug!(errors = form.errors.len(), "booking form rejected");
        return (StatusCode::BAD_REQUEST, Html(render_booking(&form))).into_response();
    };

    match state.appointments.create(new).await {
        Ok(appointment) => {
            tracing::info!(id = %appointment.id, service = %appointment.service, "booking submitted");
            Redirect::to("/?booked=1").into_response()
        }
        Err(e) => {
            tracing::error!(error = ?e, "failed to store booking");
            let form = form.apply(FormEvent::SubmitFailed(messages::FORM_SUBMIT_FAILED));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render_booking(&form))).into_response()
        }
    }
}

fn render_booking(form: &BookingFormState) -> String {
    let mut options = String::new();
    for service in SERVICES {
        let selected = if form.values.service == service.code {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            "<option value=\"{}\"{selected}>{} - {}</option>",
            service.code,
            escape_html(service.name),
            format_price(service.price_vnd)
        );
    }

    let error = |field| {
        form.error(field)
            .map(|msg| format!("<p class=\"error\">{}</p>", escape_html(msg)))
            .unwrap_or_default()
    };

    let alert = form
        .alert
        .map(|msg| format!("<div class=\"alert\" role=\"alert\">{}</div>", escape_html(msg)))
        .unwrap_or_default();

    BOOKING_HTML
        .replace("{{alert}}", &alert)
        .replace("{{name}}", &escape_html(&form.values.name))
        .replace("{{phone}}", &escape_html(&form.values.phone))
        .replace("{{datetime}}", &escape_html(&form.values.datetime))
        .replace("{{service_options}}", &options)
        .replace("{{name_error}}", &error(FormField::Name))
        .replace("{{phone_error}}", &error(FormField::Phone))
        .replace("{{service_error}}", &error(FormField::Service))
        .replace("{{datetime_error}}", &error(FormField::Datetime))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Admin ──

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

pub async fn dashboard_page(session: Option<AdminSession>) -> Response {
    match session {
        Some(_) => Html(DASHBOARD_HTML).into_response(),
        None => Redirect::to("/admin/login").into_response(),
    }
}

pub async fn redirect_to_dashboard() -> Redirect {
    Redirect::to("/admin/dashboard")
}
