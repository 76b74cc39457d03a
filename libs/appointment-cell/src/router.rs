use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment).delete(handlers::delete_appointment),
        )
        .route("/{appointment_id}/status", put(handlers::update_status))
        .route("/{appointment_id}/meet-link", put(handlers::update_meet_link))
        // Browser-clickable links embedded in the doctor notification mail.
        .route("/{appointment_id}/approve", get(handlers::approve_appointment))
        .route("/{appointment_id}/reject", get(handlers::reject_appointment))
        .with_state(state)
}
