use std::env;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub access_token_days: i64,
    pub refresh_token_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|_| "PORT must be a valid port number".to_string())?;

        let access_token_days = env::var("ACCESS_TOKEN_DAYS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<i64>()
            .map_err(|_| "ACCESS_TOKEN_DAYS must be an integer".to_string())?;

        let refresh_token_days = env::var("REFRESH_TOKEN_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()
            .map_err(|_| "REFRESH_TOKEN_DAYS must be an integer".to_string())?;

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            access_token_days,
            refresh_token_days,
        })
    }
}
