use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use super::crud::{CatalogError, ClassTypeCrud};
use super::schema::{ClassTypeResponse, CreateClassTypeRequest};
use crate::modules::auth::schema::ErrorResponse;
use crate::AppState;

fn error_response(err: CatalogError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        CatalogError::DuplicateName => StatusCode::BAD_REQUEST,
        CatalogError::NotFound => StatusCode::NOT_FOUND,
        CatalogError::Database(_) => {
            tracing::error!("catalog failure: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            );
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

pub async fn list_class_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassTypeResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = ClassTypeCrud::new(state.db.clone());
    let class_types = crud.list().await.map_err(error_response)?;

    Ok(Json(class_types.into_iter().map(Into::into).collect()))
}

pub async fn get_class_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ClassTypeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = ClassTypeCrud::new(state.db.clone());
    let class_type = crud.find_by_id(id).await.map_err(error_response)?;

    Ok(Json(class_type.into()))
}

// Catalog writes are open to any authenticated account, not just teachers.
pub async fn create_class_type(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateClassTypeRequest>,
) -> Result<(StatusCode, Json<ClassTypeResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = ClassTypeCrud::new(state.db.clone());
    let class_type = crud
        .create(
            &req.name,
            req.description.as_deref(),
            req.difficulty_level.as_deref(),
            req.base_price,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(class_type.into())))
}
