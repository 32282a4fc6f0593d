use sqlx::{MySql, Pool};
use thiserror::Error;

use super::schema::UpdateProfileRequest;
use crate::modules::auth::model::User;
use crate::services::hashing;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found")]
    UserNotFound,
    #[error("Current password is incorrect")]
    InvalidPassword,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl From<sqlx::Error> for ProfileError {
    fn from(err: sqlx::Error) -> Self {
        ProfileError::Database(err.to_string())
    }
}

pub struct ProfileCrud {
    pool: Pool<MySql>,
}

impl ProfileCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    pub async fn find(&self, user_id: i64) -> Result<User, ProfileError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProfileError::UserNotFound)
    }

    pub async fn update(
        &self,
        user_id: i64,
        req: &UpdateProfileRequest,
    ) -> Result<User, ProfileError> {
        sqlx::query(
            "UPDATE users SET \
                 name = COALESCE(?, name), \
                 phone = COALESCE(?, phone), \
                 image = COALESCE(?, image), \
                 bio = COALESCE(?, bio), \
                 specialization = COALESCE(?, specialization), \
                 experience_years = COALESCE(?, experience_years), \
                 price_per_session = COALESCE(?, price_per_session) \
             WHERE id = ?",
        )
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.image)
        .bind(&req.bio)
        .bind(&req.specialization)
        .bind(req.experience_years)
        .bind(req.price_per_session)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.find(user_id).await
    }

    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ProfileError> {
        let user = self.find(user_id).await?;

        let is_valid = hashing::verify_password(current_password, &user.password_hash)
            .map_err(|e| ProfileError::Hashing(e.to_string()))?;

        if !is_valid {
            return Err(ProfileError::InvalidPassword);
        }

        let password_hash = hashing::hash_password(new_password)
            .map_err(|e| ProfileError::Hashing(e.to_string()))?;

        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
