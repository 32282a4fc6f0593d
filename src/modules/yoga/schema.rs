use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// =============================================================================
// SCHEDULE BROWSING
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SchedulesQuery {
    pub class_type_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

/// Joined schedule row with class-type and instructor detail plus the
/// current booking count.
#[derive(Debug, FromRow, Serialize)]
pub struct ScheduleListing {
    pub id: i64,
    pub class_type_id: i64,
    pub class_type_name: String,
    pub difficulty_level: Option<String>,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub capacity: i32,
    pub booked_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ScheduleListingResponse {
    #[serde(flatten)]
    pub listing: ScheduleListing,
    pub spots_left: i64,
}

impl From<ScheduleListing> for ScheduleListingResponse {
    fn from(listing: ScheduleListing) -> Self {
        let spots_left = (listing.capacity as i64 - listing.booked_count).max(0);
        Self { listing, spots_left }
    }
}

// =============================================================================
// TEACHERS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct TeacherResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub ratings: f64,
    pub price_per_session: f64,
}

// =============================================================================
// BOOKINGS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub schedule_id: i64,
    pub notes: Option<String>,
}

/// Booking row enriched with schedule, class-type and instructor detail.
#[derive(Debug, FromRow)]
pub struct BookingDetail {
    pub id: i64,
    pub user_id: i64,
    pub schedule_id: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub class_type_name: String,
    pub instructor_name: String,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    pub user_id: i64,
    pub schedule_id: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub schedule: BookingScheduleDetail,
}

#[derive(Debug, Serialize)]
pub struct BookingScheduleDetail {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub class_type_name: String,
    pub instructor_name: String,
}

impl From<BookingDetail> for BookingResponse {
    fn from(detail: BookingDetail) -> Self {
        Self {
            id: detail.id,
            user_id: detail.user_id,
            schedule_id: detail.schedule_id,
            notes: detail.notes,
            created_at: detail.created_at,
            schedule: BookingScheduleDetail {
                date: detail.date,
                time: detail.time,
                duration_minutes: detail.duration_minutes,
                class_type_name: detail.class_type_name,
                instructor_name: detail.instructor_name,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelBookingResponse {
    pub message: &'static str,
}
