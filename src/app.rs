use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{appointments, auth, extract, pages};
use crate::state::AppState;

pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index_page))
        .route("/health", get(pages::health))
        .route(
            "/booking",
            get(pages::booking_page).post(pages::submit_booking),
        )
        .route("/admin", get(pages::redirect_to_dashboard))
        .route("/admin/login", get(pages::login_page))
        .route("/admin/dashboard", get(pages::dashboard_page))
        .route("/api/services", get(pages::services))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::current_session))
        .route(
            "/api/appointments",
            guarded(&state, get(appointments::list_appointments))
                .post(appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            guarded(
                &state,
                get(appointments::get_appointment)
                    .put(appointments::update_appointment)
                    .delete(appointments::delete_appointment),
            ),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = res.status();
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// Admin-only when `ENFORCE_API_AUTH` is set. Methods added to the returned
/// router afterwards stay public.
fn guarded(
    state: &Arc<AppState>,
    route: MethodRouter<Arc<AppState>>,
) -> MethodRouter<Arc<AppState>> {
    if state.config.enforce_api_auth {
        route.route_layer(middleware::from_fn_with_state(
            state.clone(),
            extract::require_admin,
        ))
    } else {
        route
    }
}
