use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/nearby", post(handlers::nearby_doctors))
        .route(
            "/",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
