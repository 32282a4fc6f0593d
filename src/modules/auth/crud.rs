use sqlx::{MySql, Pool};

use super::model::User;
use crate::services::{hashing, jwt::JwtService};

#[derive(Debug)]
pub enum AuthError {
    EmailTaken,
    InvalidCredentials,
    InvalidRefreshToken,
    UserNotFound,
    DatabaseError(String),
    HashingError(String),
    TokenError(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::EmailTaken => write!(f, "Email already exists"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::InvalidRefreshToken => write!(f, "Invalid refresh token"),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AuthError::HashingError(e) => write!(f, "Hashing error: {}", e),
            AuthError::TokenError(e) => write!(f, "Token error: {}", e),
        }
    }
}

/// MySQL signals unique-key violations as error 1062.
pub fn is_duplicate_entry(err: &sqlx::Error) -> bool {
    let msg = err.to_string();
    msg.contains("Duplicate entry") || msg.contains("1062")
}

pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

pub struct UserCrud {
    pool: Pool<MySql>,
}

impl UserCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        jwt: &JwtService,
    ) -> Result<AuthSession, AuthError> {
        if self
            .email_exists(email)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hashing::hash_password(password)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Unique key on email backstops the pre-check under races
            if is_duplicate_entry(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::DatabaseError(e.to_string())
            }
        })?;

        let user = self
            .find_by_id(result.last_insert_id() as i64)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        self.issue_tokens(user, jwt)
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        jwt: &JwtService,
    ) -> Result<AuthSession, AuthError> {
        let user = self
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = hashing::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_tokens(user, jwt)
    }

    pub async fn refresh(
        &self,
        refresh_token: &str,
        jwt: &JwtService,
    ) -> Result<AuthSession, AuthError> {
        let claims = jwt
            .verify_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?
            .claims;

        let user = self
            .find_by_email(&claims.sub)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidRefreshToken)?;

        self.issue_tokens(user, jwt)
    }

    fn issue_tokens(&self, user: User, jwt: &JwtService) -> Result<AuthSession, AuthError> {
        let access_token = jwt
            .create_access_token(user.id, &user.email, user.role)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        let refresh_token = jwt
            .create_refresh_token(user.id, &user.email, user.role)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        Ok(AuthSession {
            user,
            access_token,
            refresh_token,
            expires_in: jwt.get_access_token_duration_secs(),
        })
    }
}
