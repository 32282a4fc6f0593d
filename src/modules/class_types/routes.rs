use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn class_type_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(controller::list_class_types).post(controller::create_class_type),
        )
        .route("/{id}", get(controller::get_class_type))
}
