use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn hospital_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_hospitals).post(handlers::create_hospital),
        )
        .route("/{hospital_id}", get(handlers::get_hospital))
        .with_state(state)
}
