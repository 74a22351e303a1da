// SPDX-License-Identifier: Apache-2.0

use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use axum::Router;

use crate::access::{require_account, require_admin};
use crate::http::handlers::admin::{
    admin_create_doctor_handler, admin_delete_doctor_handler, admin_delete_user_handler,
    admin_list_doctors_handler, admin_list_users_handler, admin_update_doctor_handler,
    admin_update_role_handler, admin_update_status_handler,
};
use crate::http::handlers::appointments::{
    availability_handler, calendar_handler, cancel_appointment_handler,
    create_appointment_handler, slots_handler, user_appointments_handler,
};
use crate::http::handlers::auth::{login_handler, register_handler};
use crate::http::handlers::doctors::{get_doctor_handler, list_doctors_handler};
use crate::http::handlers::system::{health_handler, not_found_handler, openapi_handler};
use crate::middleware::audit::audit_middleware;
use crate::middleware::cors::cors_middleware;
use crate::middleware::request_tracing::request_tracing_middleware;
use crate::middleware::timeout::timeout_middleware;
use crate::AppState;

/// Request tracing is the outermost layer so every response, including
/// gate rejections and timeouts, carries the request id.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/openapi.json", get(openapi_handler))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/doctors", get(list_doctors_handler))
        .route("/api/doctors/:id", get(get_doctor_handler));

    let authenticated = Router::new()
        .route("/api/appointments", post(create_appointment_handler))
        .route("/api/appointments/user", get(user_appointments_handler))
        .route("/api/appointments/availability", get(availability_handler))
        .route("/api/appointments/slots", get(slots_handler))
        .route("/api/appointments/calendar", get(calendar_handler))
        .route(
            "/api/appointments/:id/cancel",
            post(cancel_appointment_handler),
        )
        .route_layer(from_fn_with_state(state.clone(), require_account));

    // route_layer order: the last one added runs first.
    let admin = Router::new()
        .route(
            "/api/admin/doctors",
            get(admin_list_doctors_handler).post(admin_create_doctor_handler),
        )
        .route(
            "/api/admin/doctors/:id",
            put(admin_update_doctor_handler).delete(admin_delete_doctor_handler),
        )
        .route("/api/admin/users", get(admin_list_users_handler))
        .route(
            "/api/admin/users/:id",
            axum::routing::delete(admin_delete_user_handler),
        )
        .route("/api/admin/users/:id/role", put(admin_update_role_handler))
        .route(
            "/api/admin/appointments/:id/status",
            put(admin_update_status_handler),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_account));

    public
        .merge(authenticated)
        .merge(admin)
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(from_fn_with_state(state.clone(), timeout_middleware))
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(from_fn_with_state(state.clone(), audit_middleware))
        .layer(from_fn_with_state(state.clone(), request_tracing_middleware))
        .with_state(state)
}
