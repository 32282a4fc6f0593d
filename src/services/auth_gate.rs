use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::modules::auth::crud::UserCrud;
use crate::modules::auth::model::Role;
use crate::modules::auth::schema::ErrorResponse;
use crate::AppState;

/// Paths served without a bearer token. A trailing `*` matches any
/// path under the prefix, anything else must match exactly.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/health",
    "/auth/*",
    "/docs",
    "/openapi.json",
    "/yoga/schedules",
];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|pattern| match pattern.strip_suffix('*') {
        Some(prefix) => path.starts_with(prefix),
        None => path == *pattern,
    })
}

/// Identity attached to every authenticated request by the gate.
/// Handlers receive it through `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn require_teacher(&self) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
        match self.role {
            Role::Teacher => Ok(()),
            Role::Student => Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Only teachers can access this resource")),
            )),
        }
    }
}

/// Per-request authentication. Runs before every handler, is read-only,
/// and never touches requests on the public allow-list.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match bearer {
        Some(token) => token,
        None => return unauthorized("Authorization header missing or invalid"),
    };

    let claims = match state.jwt_service.verify_access_token(token) {
        Ok(data) => data.claims,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    let crud = UserCrud::new(state.db.clone());
    let user = match crud.find_by_email(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("User not found"),
        Err(e) => {
            tracing::error!("auth gate user lookup failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response();
        }
    };

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
    });

    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response()
}
