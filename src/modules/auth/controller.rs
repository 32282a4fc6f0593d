use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use super::crud::{AuthError, UserCrud};
use super::schema::{
    AuthResponse, ErrorResponse, LoginRequest, RefreshTokenRequest, SignupRequest,
};
use crate::AppState;

fn error_response(err: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        AuthError::EmailTaken => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials | AuthError::InvalidRefreshToken => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
        AuthError::DatabaseError(_) | AuthError::HashingError(_) | AuthError::TokenError(_) => {
            tracing::error!("auth failure: {}", err);
            eprintln!("DEBUG auth failure: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            );
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

fn session_response(session: super::crud::AuthSession) -> AuthResponse {
    AuthResponse {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        token_type: "Bearer",
        expires_in: session.expires_in,
        user: session.user.into(),
    }
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = UserCrud::new(state.db.clone());
    let session = crud
        .signup(&req.name, &req.email, &req.password, &state.jwt_service)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(session_response(session))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = UserCrud::new(state.db.clone());
    let session = crud
        .login(&req.email, &req.password, &state.jwt_service)
        .await
        .map_err(error_response)?;

    Ok(Json(session_response(session)))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = UserCrud::new(state.db.clone());
    let session = crud
        .refresh(&req.refresh_token, &state.jwt_service)
        .await
        .map_err(error_response)?;

    Ok(Json(session_response(session)))
}
