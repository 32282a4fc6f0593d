use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Closed set of account roles. Students are stored as `user` in the
/// database for compatibility with the existing schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    #[sqlx(rename = "user")]
    #[serde(rename = "user")]
    Student,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub ratings: f64,
    pub price_per_session: f64,
    pub created_at: DateTime<Utc>,
}
