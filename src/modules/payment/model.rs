use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Payments are modeled but not yet wired into the booking flow. The
/// table exists so bookings can reference completed payments once a
/// provider is integrated.
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
    pub method: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
