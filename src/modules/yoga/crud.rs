use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sqlx::{MySql, Pool};
use thiserror::Error;

use super::model::Schedule;
use super::schema::{BookingDetail, ScheduleListing, SchedulesQuery, TeacherResponse};
use crate::modules::auth::crud::is_duplicate_entry;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Schedule not found")]
    ScheduleNotFound,
    #[error("Cannot book a class that has already started")]
    ScheduleInPast,
    #[error("Schedule is fully booked")]
    FullyBooked,
    #[error("You have already booked this schedule")]
    AlreadyBooked,
    #[error("Booking not found")]
    BookingNotFound,
    #[error("Bookings can only be cancelled at least 2 hours before the class starts")]
    CancellationTooLate,
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        BookingError::Database(err.to_string())
    }
}

const BOOKING_DETAIL_QUERY: &str = "\
    SELECT b.id, b.user_id, b.schedule_id, b.notes, b.created_at, \
           s.date, s.time, s.duration_minutes, \
           ct.name AS class_type_name, u.name AS instructor_name \
    FROM bookings b \
    JOIN schedules s ON s.id = b.schedule_id \
    JOIN class_types ct ON ct.id = s.class_type_id \
    JOIN users u ON u.id = s.instructor_id";

pub struct BookingCrud {
    pool: Pool<MySql>,
}

impl BookingCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// Upcoming schedules with class-type and instructor detail, optionally
    /// filtered by class type and date.
    pub async fn list_schedules(
        &self,
        query: &SchedulesQuery,
    ) -> Result<Vec<ScheduleListing>, BookingError> {
        let today = Utc::now().date_naive();

        let listings = sqlx::query_as::<_, ScheduleListing>(
            "SELECT s.id, s.class_type_id, ct.name AS class_type_name, \
                    ct.difficulty_level, s.instructor_id, u.name AS instructor_name, \
                    s.date, s.time, s.duration_minutes, s.capacity, \
                    COUNT(b.id) AS booked_count \
             FROM schedules s \
             JOIN class_types ct ON ct.id = s.class_type_id \
             JOIN users u ON u.id = s.instructor_id \
             LEFT JOIN bookings b ON b.schedule_id = s.id \
             WHERE s.date >= ? \
               AND (? IS NULL OR s.class_type_id = ?) \
               AND (? IS NULL OR s.date = ?) \
             GROUP BY s.id, s.class_type_id, ct.name, ct.difficulty_level, \
                      s.instructor_id, u.name, s.date, s.time, s.duration_minutes, s.capacity \
             ORDER BY s.date, s.time",
        )
        .bind(today)
        .bind(query.class_type_id)
        .bind(query.class_type_id)
        .bind(query.date)
        .bind(query.date)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    pub async fn list_teachers(&self) -> Result<Vec<TeacherResponse>, BookingError> {
        let teachers = sqlx::query_as::<_, crate::modules::auth::model::User>(
            "SELECT * FROM users WHERE role = 'teacher' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teachers
            .into_iter()
            .map(|t| TeacherResponse {
                id: t.id,
                name: t.name,
                image: t.image,
                bio: t.bio,
                specialization: t.specialization,
                experience_years: t.experience_years,
                ratings: t.ratings,
                price_per_session: t.price_per_session,
            })
            .collect())
    }

    /// Reserve a seat. The schedule row is locked for the duration of the
    /// transaction so the capacity check and insert are atomic with respect
    /// to concurrent bookings for the same schedule.
    pub async fn create(
        &self,
        user_id: i64,
        schedule_id: i64,
        notes: Option<&str>,
    ) -> Result<BookingDetail, BookingError> {
        let mut tx = self.pool.begin().await?;

        let schedule = sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE id = ? FOR UPDATE",
        )
        .bind(schedule_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BookingError::ScheduleNotFound)?;

        // Dropping the transaction on any early return rolls it back.
        if schedule.starts_at() < Utc::now().naive_utc() {
            return Err(BookingError::ScheduleInPast);
        }

        let (booked,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE schedule_id = ?")
                .bind(schedule_id)
                .fetch_one(&mut *tx)
                .await?;

        if booked >= schedule.capacity as i64 {
            return Err(BookingError::FullyBooked);
        }

        let (existing,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings WHERE schedule_id = ? AND user_id = ?",
        )
        .bind(schedule_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if existing > 0 {
            return Err(BookingError::AlreadyBooked);
        }

        let result = sqlx::query(
            "INSERT INTO bookings (user_id, schedule_id, notes) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(schedule_id)
        .bind(notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            // UNIQUE(user_id, schedule_id) backstops the pre-check
            if is_duplicate_entry(&e) {
                BookingError::AlreadyBooked
            } else {
                BookingError::Database(e.to_string())
            }
        })?;

        let booking_id = result.last_insert_id() as i64;
        tx.commit().await?;

        self.find_detail(booking_id).await
    }

    async fn find_detail(&self, booking_id: i64) -> Result<BookingDetail, BookingError> {
        let query = format!("{} WHERE b.id = ?", BOOKING_DETAIL_QUERY);

        sqlx::query_as::<_, BookingDetail>(sqlx::AssertSqlSafe(query))
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BookingError::BookingNotFound)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<BookingDetail>, BookingError> {
        let query = format!(
            "{} WHERE b.user_id = ? ORDER BY b.created_at DESC, b.id DESC",
            BOOKING_DETAIL_QUERY
        );

        let bookings = sqlx::query_as::<_, BookingDetail>(sqlx::AssertSqlSafe(query))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    pub async fn find_for_user(
        &self,
        booking_id: i64,
        user_id: i64,
    ) -> Result<BookingDetail, BookingError> {
        let query = format!("{} WHERE b.id = ? AND b.user_id = ?", BOOKING_DETAIL_QUERY);

        sqlx::query_as::<_, BookingDetail>(sqlx::AssertSqlSafe(query))
            .bind(booking_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BookingError::BookingNotFound)
    }

    /// Cancel a booking. Allowed only while the schedule start is at least
    /// 2 hours away, measured against wall-clock now.
    pub async fn cancel(&self, user_id: i64, booking_id: i64) -> Result<(), BookingError> {
        let row: Option<(i64, NaiveDate, NaiveTime)> = sqlx::query_as(
            "SELECT b.id, s.date, s.time \
             FROM bookings b \
             JOIN schedules s ON s.id = b.schedule_id \
             WHERE b.id = ? AND b.user_id = ?",
        )
        .bind(booking_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let (id, date, time) = row.ok_or(BookingError::BookingNotFound)?;

        let starts_at = date.and_time(time);
        if starts_at - Utc::now().naive_utc() < Duration::hours(2) {
            return Err(BookingError::CancellationTooLate);
        }

        sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
