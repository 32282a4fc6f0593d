use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use super::crud::{BookingCrud, BookingError};
use super::schema::{
    BookingResponse, CancelBookingResponse, CreateBookingRequest, ScheduleListingResponse,
    SchedulesQuery, TeacherResponse,
};
use crate::modules::auth::schema::ErrorResponse;
use crate::services::auth_gate::CurrentUser;
use crate::AppState;

fn error_response(err: BookingError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        BookingError::ScheduleNotFound | BookingError::BookingNotFound => StatusCode::NOT_FOUND,
        BookingError::ScheduleInPast
        | BookingError::FullyBooked
        | BookingError::AlreadyBooked
        | BookingError::CancellationTooLate => StatusCode::BAD_REQUEST,
        BookingError::Database(_) => {
            tracing::error!("booking failure: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            );
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

// Public: no CurrentUser here, the gate allow-lists this path.
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchedulesQuery>,
) -> Result<Json<Vec<ScheduleListingResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = BookingCrud::new(state.db.clone());
    let listings = crud.list_schedules(&query).await.map_err(error_response)?;

    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

pub async fn list_teachers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeacherResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = BookingCrud::new(state.db.clone());
    let teachers = crud.list_teachers().await.map_err(error_response)?;

    Ok(Json(teachers))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), (StatusCode, Json<ErrorResponse>)> {
    let crud = BookingCrud::new(state.db.clone());
    let booking = crud
        .create(user.id, req.schedule_id, req.notes.as_deref())
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<BookingResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = BookingCrud::new(state.db.clone());
    let bookings = crud.list_for_user(user.id).await.map_err(error_response)?;

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<BookingResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = BookingCrud::new(state.db.clone());
    let booking = crud
        .find_for_user(id, user.id)
        .await
        .map_err(error_response)?;

    Ok(Json(booking.into()))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<CancelBookingResponse>, (StatusCode, Json<ErrorResponse>)> {
    let crud = BookingCrud::new(state.db.clone());
    crud.cancel(user.id, id).await.map_err(error_response)?;

    Ok(Json(CancelBookingResponse {
        message: "Booking cancelled successfully",
    }))
}
