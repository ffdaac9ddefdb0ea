//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{
    AuthConfig, InMemoryUserRepository, PgUserRepository, api_v1_router, api_v1_router_generic,
    auth_router, auth_router_generic,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Auth configuration
    let config = AuthConfig::from_env(if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    });

    // Without a database the service keeps users in memory
    let app = match env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()) {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let repo = PgUserRepository::new(pool);
            Router::new()
                .merge(auth_router(repo.clone(), config.clone()))
                .nest("/api/v1", api_v1_router(repo, config))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory");

            let repo = InMemoryUserRepository::new();
            Router::new()
                .merge(auth_router_generic(repo.clone(), config.clone()))
                .nest("/api/v1", api_v1_router_generic(repo, config))
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let host: IpAddr = env::var("API_HOST")
        .ok()
        .and_then(|host| host.parse().ok())
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));
    let port: u16 = env::var("API_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::new(host, port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
