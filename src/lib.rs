pub mod config;
pub mod modules;
pub mod services;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::DbPool;
use modules::auth::auth_routes;
use modules::class_types::class_type_routes;
use modules::teacher::teacher_routes;
use modules::user::user_routes;
use modules::yoga::yoga_routes;
use services::auth_gate::auth_gate;
use services::jwt::JwtService;
use services::security::security_headers;

pub struct AppState {
    pub db: DbPool,
    pub jwt_service: JwtService,
}

pub async fn create_app(db: DbPool, jwt_service: JwtService) -> Router {
    let state = Arc::new(AppState { db, jwt_service });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes())
        .nest("/class-types", class_type_routes())
        .nest("/yoga", yoga_routes())
        .nest("/teacher", teacher_routes())
        .nest("/user", user_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Book My Yoga API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
