use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn yoga_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedules", get(controller::list_schedules))
        .route("/teachers", get(controller::list_teachers))
        .route(
            "/bookings",
            get(controller::list_bookings).post(controller::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(controller::get_booking).delete(controller::cancel_booking),
        )
}
