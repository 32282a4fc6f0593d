use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use validator::Validate;

use super::crud::{ScheduleCrud, ScheduleError};
use super::schema::{
    CreateScheduleRequest, DashboardResponse, DeleteScheduleResponse, ScheduleRow,
    ScheduleWithBookings, StudentResponse,
};
use crate::modules::auth::schema::ErrorResponse;
use crate::services::auth_gate::CurrentUser;
use crate::AppState;

fn error_response(err: ScheduleError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        ScheduleError::ClassTypeNotFound | ScheduleError::ScheduleNotFound => {
            StatusCode::NOT_FOUND
        }
        ScheduleError::HasBookings => StatusCode::BAD_REQUEST,
        ScheduleError::Database(_) => {
            tracing::error!("schedule failure: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            );
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ScheduleWithBookings>>, (StatusCode, Json<ErrorResponse>)> {
    user.require_teacher()?;

    let crud = ScheduleCrud::new(state.db.clone());
    let schedules = crud
        .list_for_teacher(user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(schedules))
}

pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleRow>), (StatusCode, Json<ErrorResponse>)> {
    user.require_teacher()?;

    if let Err(e) = req.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(e.to_string())),
        ));
    }

    let crud = ScheduleCrud::new(state.db.clone());
    let schedule = crud
        .create(
            user.id,
            req.class_type_id,
            req.date,
            req.time,
            req.duration_minutes,
            req.capacity,
        )
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ScheduleWithBookings>, (StatusCode, Json<ErrorResponse>)> {
    user.require_teacher()?;

    let crud = ScheduleCrud::new(state.db.clone());
    let schedule = crud.detail(user.id, id).await.map_err(error_response)?;

    Ok(Json(schedule))
}

pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteScheduleResponse>, (StatusCode, Json<ErrorResponse>)> {
    user.require_teacher()?;

    let crud = ScheduleCrud::new(state.db.clone());
    crud.delete(user.id, id).await.map_err(error_response)?;

    Ok(Json(DeleteScheduleResponse {
        message: "Schedule deleted successfully",
    }))
}

pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<StudentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    user.require_teacher()?;

    let crud = ScheduleCrud::new(state.db.clone());
    let students = crud.students(user.id).await.map_err(error_response)?;

    Ok(Json(students))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ErrorResponse>)> {
    user.require_teacher()?;

    let crud = ScheduleCrud::new(state.db.clone());
    let dashboard = crud.dashboard(user.id).await.map_err(error_response)?;

    Ok(Json(dashboard))
}
