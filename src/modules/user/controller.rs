use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;
use validator::Validate;

use super::crud::{ProfileCrud, ProfileError};
use super::schema::{
    ChangePasswordRequest, ChangePasswordResponse, ProfileResponse, UpdateProfileRequest,
};
use crate::modules::auth::schema::ErrorResponse;
use crate::services::auth_gate::CurrentUser;
use crate::AppState;

fn error_response(err: ProfileError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        ProfileError::UserNotFound => StatusCode::NOT_FOUND,
        ProfileError::InvalidPassword => StatusCode::UNAUTHORIZED,
        ProfileError::Database(_) | ProfileError::Hashing(_) => {
            tracing::error!("profile failure: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            );
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = ProfileCrud::new(state.db.clone());
    let profile = crud.find(user.id).await.map_err(error_response)?;

    Ok(Json(profile.into()))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = ProfileCrud::new(state.db.clone());
    let profile = crud.update(user.id, &req).await.map_err(error_response)?;

    Ok(Json(profile.into()))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ChangePasswordResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = ProfileCrud::new(state.db.clone());
    crud.change_password(user.id, &req.current_password, &req.new_password)
        .await
        .map_err(error_response)?;

    Ok(Json(ChangePasswordResponse {
        message: "Password changed successfully",
    }))
}
