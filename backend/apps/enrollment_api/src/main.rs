//! Enrollment Service Entry Point
//!
//! Hosts the enrollment routes under `/api/enrollments`.

use anyhow::Context;
use auth::{AuthConfig, AuthorizationGate, TokenVerifier};
use axum::{
    Router, http,
    http::{Method, header},
};
use enrollment::{
    EnrollmentAppState, HttpCourseCatalog, HttpUserDirectory, PgEnrollmentRepository,
    enrollment_router,
};
use platform::remote::{Dependency, RemoteCaller, RetryPolicy};
use platform::transport::ReqwestTransport;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "enrollment_api=info,enrollment=info,auth=info,platform=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/enrollment/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = match env::var("JWT_SECRET") {
        Ok(secret) => AuthConfig::new(secret),
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using development secret");
            AuthConfig::development()
        }
        Err(_) => anyhow::bail!("JWT_SECRET must be set in production"),
    };
    let gate = Arc::new(AuthorizationGate::new(Arc::new(TokenVerifier::new(
        &auth_config,
    ))));

    let user_url =
        env::var("USER_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8081".to_string());
    let course_url =
        env::var("COURSE_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8082".to_string());

    let retry = RetryPolicy::default();
    tracing::info!(
        max_attempts = retry.max_attempts,
        worst_case_wait = ?retry.worst_case_wait(),
        "Peer retry policy"
    );

    let users = HttpUserDirectory::new(RemoteCaller::new(
        Dependency::User,
        ReqwestTransport::new(user_url)?,
        retry.clone(),
    ));
    let courses = HttpCourseCatalog::new(RemoteCaller::new(
        Dependency::Course,
        ReqwestTransport::new(course_url)?,
        retry,
    ));

    let state = EnrollmentAppState {
        repo: Arc::new(PgEnrollmentRepository::new(pool)),
        users: Arc::new(users),
        courses: Arc::new(courses),
        gate,
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = Router::new()
        .nest("/api/enrollments", enrollment_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8083".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
