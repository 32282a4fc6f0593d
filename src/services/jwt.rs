use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,          // user email
    pub user_id: i64,
    pub role: Role,
    pub token_type: TokenKind,
    pub exp: i64,             // expiration time
    pub iat: i64,             // issued at
    pub jti: String,          // unique token id
}

pub struct JwtService {
    secret: String,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl JwtService {
    /// Default lifetimes match the deployed configuration: access tokens
    /// last 10 days, refresh tokens 30.
    pub fn new(secret: String) -> Self {
        Self::with_token_lifetimes(secret, 10, 30)
    }

    pub fn with_token_lifetimes(secret: String, access_days: i64, refresh_days: i64) -> Self {
        Self {
            secret,
            access_token_duration: Duration::days(access_days),
            refresh_token_duration: Duration::days(refresh_days),
        }
    }

    pub fn create_access_token(
        &self,
        user_id: i64,
        email: &str,
        role: Role,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.create_token(user_id, email, role, TokenKind::Access, self.access_token_duration)
    }

    pub fn create_refresh_token(
        &self,
        user_id: i64,
        email: &str,
        role: Role,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.create_token(user_id, email, role, TokenKind::Refresh, self.refresh_token_duration)
    }

    fn create_token(
        &self,
        user_id: i64,
        email: &str,
        role: Role,
        token_type: TokenKind,
        lifetime: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + lifetime;

        let claims = Claims {
            sub: email.to_string(),
            user_id,
            role,
            token_type,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify_access_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        self.verify(token, TokenKind::Access)
    }

    pub fn verify_refresh_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        self.verify(token, TokenKind::Refresh)
    }

    fn verify(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        // A refresh token must never pass as an access token and vice versa
        if data.claims.token_type != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }

        Ok(data)
    }

    pub fn get_access_token_duration_secs(&self) -> i64 {
        self.access_token_duration.num_seconds()
    }
}
