use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// =============================================================================
// SCHEDULES
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    pub class_type_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: i32,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
}

/// Schedule row joined with its class-type name.
#[derive(Debug, FromRow, Serialize)]
pub struct ScheduleRow {
    pub id: i64,
    pub class_type_id: i64,
    pub class_type_name: String,
    pub instructor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub capacity: i32,
}

#[derive(Debug, Serialize)]
pub struct ScheduleWithBookings {
    #[serde(flatten)]
    pub schedule: ScheduleRow,
    pub bookings: Vec<ScheduleBooking>,
}

/// One booking on a teacher's schedule, with the booking student.
#[derive(Debug, FromRow, Serialize)]
pub struct ScheduleBooking {
    #[serde(skip_serializing)]
    pub schedule_id: i64,
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DeleteScheduleResponse {
    pub message: &'static str,
}

// =============================================================================
// STUDENTS
// =============================================================================

#[derive(Debug, FromRow, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_schedules: i64,
    pub total_bookings: i64,
    pub unique_students: i64,
    pub upcoming_schedules: Vec<ScheduleRow>,
}
