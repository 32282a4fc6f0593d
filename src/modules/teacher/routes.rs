use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn teacher_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/schedules",
            get(controller::list_schedules).post(controller::create_schedule),
        )
        .route(
            "/schedules/{id}",
            get(controller::get_schedule).delete(controller::delete_schedule),
        )
        .route("/students", get(controller::list_students))
        .route("/dashboard", get(controller::dashboard))
}
