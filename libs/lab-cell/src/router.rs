use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn lab_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_labs).post(handlers::create_lab))
        .route("/{lab_id}", get(handlers::get_lab))
        .with_state(state)
}
