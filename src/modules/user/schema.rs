use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::auth::model::{Role, User};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
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

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            image: user.image,
            phone: user.phone,
            bio: user.bio,
            specialization: user.specialization,
            experience_years: user.experience_years,
            ratings: user.ratings,
            price_per_session: user.price_per_session,
            created_at: user.created_at,
        }
    }
}

/// Absent fields keep their stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub specialization: Option<String>,
    #[validate(range(min = 0, message = "Experience years cannot be negative"))]
    pub experience_years: Option<i32>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price_per_session: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub message: &'static str,
}
