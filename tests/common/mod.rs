use axum_test::TestServer;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use sqlx::{MySql, Pool};

use yoga_booking::services::jwt::JwtService;

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub db: Pool<MySql>,
}

#[allow(dead_code)]
impl TestContext {
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

        let db = sqlx::mysql::MySqlPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let jwt_service = JwtService::new(jwt_secret());

        let app = yoga_booking::create_app(db.clone(), jwt_service).await;
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, db }
    }

    pub async fn cleanup(&self) {
        // Child tables first, FK order
        sqlx::query("DELETE FROM bookings").execute(&self.db).await.ok();
        sqlx::query("DELETE FROM schedules").execute(&self.db).await.ok();
        sqlx::query("DELETE FROM payments").execute(&self.db).await.ok();
        sqlx::query("DELETE FROM class_types").execute(&self.db).await.ok();
        sqlx::query("DELETE FROM users").execute(&self.db).await.ok();
    }

    /// Sign up a student account, returning (user id, access token).
    pub async fn signup(&self, email: &str) -> (i64, String) {
        let response = self
            .server
            .post("/auth/signup")
            .json(&json!({
                "name": "Test User",
                "email": email,
                "password": test_password()
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        (
            body["user"]["id"].as_i64().expect("user id"),
            body["access_token"].as_str().expect("access token").to_string(),
        )
    }

    /// Sign up and promote to teacher. The gate reads the role from the
    /// database on every request, so the existing token stays usable.
    pub async fn signup_teacher(&self, email: &str) -> (i64, String) {
        let (id, token) = self.signup(email).await;

        sqlx::query("UPDATE users SET role = 'teacher' WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .expect("Failed to promote user to teacher");

        (id, token)
    }

    pub async fn create_class_type(&self, token: &str, name: &str) -> i64 {
        let response = self
            .server
            .post("/class-types")
            .authorization_bearer(token)
            .json(&json!({
                "name": name,
                "description": "Flow sequences",
                "difficulty_level": "Beginner",
                "base_price": 15.0
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["id"].as_i64().expect("class type id")
    }

    pub async fn create_schedule(
        &self,
        token: &str,
        class_type_id: i64,
        date: NaiveDate,
        time: NaiveTime,
        capacity: i32,
    ) -> i64 {
        let response = self
            .server
            .post("/teacher/schedules")
            .authorization_bearer(token)
            .json(&json!({
                "class_type_id": class_type_id,
                "date": date,
                "time": time,
                "duration_minutes": 60,
                "capacity": capacity
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        body["id"].as_i64().expect("schedule id")
    }
}

#[allow(dead_code)]
pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "test-secret-key-for-testing-only".to_string())
}

// Helper to generate unique test email
#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

// Helper to generate unique class-type names
#[allow(dead_code)]
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}

#[allow(dead_code)]
pub fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

#[allow(dead_code)]
pub fn nine_am() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

/// Date and time of a class starting the given number of hours from now.
#[allow(dead_code)]
pub fn start_in_hours(hours: i64) -> (NaiveDate, NaiveTime) {
    let start = Utc::now().naive_utc() + Duration::hours(hours);
    (start.date(), start.time())
}
