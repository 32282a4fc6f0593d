use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sqlx::{MySql, Pool};
use std::collections::HashMap;
use thiserror::Error;

use super::schema::{
    DashboardResponse, ScheduleBooking, ScheduleRow, ScheduleWithBookings, StudentResponse,
};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Class type not found")]
    ClassTypeNotFound,
    #[error("Schedule not found")]
    ScheduleNotFound,
    #[error("Cannot delete schedule with existing bookings")]
    HasBookings,
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for ScheduleError {
    fn from(err: sqlx::Error) -> Self {
        ScheduleError::Database(err.to_string())
    }
}

const SCHEDULE_ROW_QUERY: &str = "\
    SELECT s.id, s.class_type_id, ct.name AS class_type_name, s.instructor_id, \
           s.date, s.time, s.duration_minutes, s.capacity \
    FROM schedules s \
    JOIN class_types ct ON ct.id = s.class_type_id";

pub struct ScheduleCrud {
    pool: Pool<MySql>,
}

impl ScheduleCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        teacher_id: i64,
        class_type_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: i32,
        capacity: i32,
    ) -> Result<ScheduleRow, ScheduleError> {
        let (class_type_exists,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM class_types WHERE id = ?")
                .bind(class_type_id)
                .fetch_one(&self.pool)
                .await?;

        if class_type_exists == 0 {
            return Err(ScheduleError::ClassTypeNotFound);
        }

        let result = sqlx::query(
            "INSERT INTO schedules (class_type_id, instructor_id, date, time, duration_minutes, capacity) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(class_type_id)
        .bind(teacher_id)
        .bind(date)
        .bind(time)
        .bind(duration_minutes)
        .bind(capacity)
        .execute(&self.pool)
        .await?;

        let query = format!("{} WHERE s.id = ?", SCHEDULE_ROW_QUERY);
        sqlx::query_as::<_, ScheduleRow>(sqlx::AssertSqlSafe(query))
            .bind(result.last_insert_id() as i64)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)
    }

    pub async fn list_for_teacher(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<ScheduleWithBookings>, ScheduleError> {
        let query = format!(
            "{} WHERE s.instructor_id = ? ORDER BY s.date, s.time",
            SCHEDULE_ROW_QUERY
        );
        let schedules = sqlx::query_as::<_, ScheduleRow>(sqlx::AssertSqlSafe(query))
            .bind(teacher_id)
            .fetch_all(&self.pool)
            .await?;

        let bookings = sqlx::query_as::<_, ScheduleBooking>(
            "SELECT b.schedule_id, b.id, b.user_id, u.name AS user_name, \
                    u.email AS user_email, b.notes, b.created_at \
             FROM bookings b \
             JOIN schedules s ON s.id = b.schedule_id \
             JOIN users u ON u.id = b.user_id \
             WHERE s.instructor_id = ? \
             ORDER BY b.created_at",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_schedule: HashMap<i64, Vec<ScheduleBooking>> = HashMap::new();
        for booking in bookings {
            by_schedule.entry(booking.schedule_id).or_default().push(booking);
        }

        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let bookings = by_schedule.remove(&schedule.id).unwrap_or_default();
                ScheduleWithBookings { schedule, bookings }
            })
            .collect())
    }

    pub async fn detail(
        &self,
        teacher_id: i64,
        schedule_id: i64,
    ) -> Result<ScheduleWithBookings, ScheduleError> {
        let query = format!(
            "{} WHERE s.id = ? AND s.instructor_id = ?",
            SCHEDULE_ROW_QUERY
        );
        let schedule = sqlx::query_as::<_, ScheduleRow>(sqlx::AssertSqlSafe(query))
            .bind(schedule_id)
            .bind(teacher_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)?;

        let bookings = sqlx::query_as::<_, ScheduleBooking>(
            "SELECT b.schedule_id, b.id, b.user_id, u.name AS user_name, \
                    u.email AS user_email, b.notes, b.created_at \
             FROM bookings b \
             JOIN users u ON u.id = b.user_id \
             WHERE b.schedule_id = ? \
             ORDER BY b.created_at",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ScheduleWithBookings { schedule, bookings })
    }

    /// Delete a schedule the teacher owns, refusing while bookings exist.
    /// The schedule row is locked so a booking committing concurrently
    /// cannot slip in between the check and the cascading delete.
    pub async fn delete(&self, teacher_id: i64, schedule_id: i64) -> Result<(), ScheduleError> {
        let mut tx = self.pool.begin().await?;

        let owned: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM schedules WHERE id = ? AND instructor_id = ? FOR UPDATE",
        )
        .bind(schedule_id)
        .bind(teacher_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Err(ScheduleError::ScheduleNotFound);
        }

        let (booked,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE schedule_id = ?")
                .bind(schedule_id)
                .fetch_one(&mut *tx)
                .await?;

        if booked > 0 {
            return Err(ScheduleError::HasBookings);
        }

        sqlx::query("DELETE FROM schedules WHERE id = ?")
            .bind(schedule_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Distinct students who have booked any of this teacher's schedules.
    pub async fn students(&self, teacher_id: i64) -> Result<Vec<StudentResponse>, ScheduleError> {
        let students = sqlx::query_as::<_, StudentResponse>(
            "SELECT DISTINCT u.id, u.name, u.email, u.created_at \
             FROM users u \
             JOIN bookings b ON b.user_id = u.id \
             JOIN schedules s ON s.id = b.schedule_id \
             WHERE s.instructor_id = ? \
             ORDER BY u.name",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    pub async fn dashboard(&self, teacher_id: i64) -> Result<DashboardResponse, ScheduleError> {
        let (total_schedules,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM schedules WHERE instructor_id = ?")
                .bind(teacher_id)
                .fetch_one(&self.pool)
                .await?;

        let (total_bookings,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings b \
             JOIN schedules s ON s.id = b.schedule_id \
             WHERE s.instructor_id = ?",
        )
        .bind(teacher_id)
        .fetch_one(&self.pool)
        .await?;

        let (unique_students,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT b.user_id) FROM bookings b \
             JOIN schedules s ON s.id = b.schedule_id \
             WHERE s.instructor_id = ?",
        )
        .bind(teacher_id)
        .fetch_one(&self.pool)
        .await?;

        let today = Utc::now().date_naive();
        let next_week = today + Duration::days(7);

        let query = format!(
            "{} WHERE s.instructor_id = ? AND s.date >= ? AND s.date <= ? \
             ORDER BY s.date, s.time LIMIT 5",
            SCHEDULE_ROW_QUERY
        );
        let upcoming_schedules = sqlx::query_as::<_, ScheduleRow>(sqlx::AssertSqlSafe(query))
            .bind(teacher_id)
            .bind(today)
            .bind(next_week)
            .fetch_all(&self.pool)
            .await?;

        Ok(DashboardResponse {
            total_schedules,
            total_bookings,
            unique_students,
            upcoming_schedules,
        })
    }
}
