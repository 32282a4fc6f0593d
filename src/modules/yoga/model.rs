use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::FromRow;

/// A single bookable class instance: class type + instructor + date/time
/// + capacity.
#[derive(Debug, Clone, FromRow)]
pub struct Schedule {
    pub id: i64,
    pub class_type_id: i64,
    pub instructor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub capacity: i32,
}

impl Schedule {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A reservation binding one student to one schedule.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub schedule_id: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
