use yoga_booking::config::{environment::Config, init_db};
use yoga_booking::services::jwt::JwtService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yoga_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url).await;
    tracing::info!("Connected to MySQL");

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");

    let jwt_service = JwtService::with_token_lifetimes(
        config.jwt_secret,
        config.access_token_days,
        config.refresh_token_days,
    );

    let app = yoga_booking::create_app(db, jwt_service).await;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
