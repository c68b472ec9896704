//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthMiddlewareState, PgUserRepository, RedisTokenStore, TokenCodec, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use cats::{CatsPurger, ObjectStorePhotoStorage, PgCatRepository, cats_router};
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{MinioConfig, ServerConfig};

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
                .unwrap_or_else(|_| "api=info,auth=info,cats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token store
    let redis = redis::Client::open(config.redis_url.as_str())?;
    let tokens = RedisTokenStore::new(ConnectionManager::new(redis).await?);

    tracing::info!("Connected to redis");

    // Photo storage
    let store = object_store(&config.minio)?;
    let storage = ObjectStorePhotoStorage::new(
        store,
        config.minio.bucket.clone(),
        config.minio.public_url.clone(),
    );

    tracing::info!(bucket = %config.minio.bucket, "Photo storage configured");

    // Cats are purged before their owner is deleted
    let cat_repo = PgCatRepository::new(pool.clone());
    let purger = CatsPurger::new(
        Arc::new(cat_repo.clone()),
        Arc::new(cat_repo.clone()),
        Arc::new(storage.clone()),
    );

    // Cat routes verify tokens with the same secret as the auth routes
    let guard = AuthMiddlewareState::new(
        Arc::new(tokens.clone()),
        Arc::new(TokenCodec::new(&config.auth)),
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = app(
        auth_router(
            PgUserRepository::new(pool.clone()),
            tokens,
            purger,
            config.auth.clone(),
        ),
        cats_router(cat_repo, storage, guard, config.cats.clone()),
    )
    .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.addr);

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Public surface: health check, auth routes under `/api`, cat routes
/// under `/api/auth/cat`.
fn app(auth: Router, cats: Router) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .nest("/api", auth)
        .nest("/api/auth/cat", cats)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "Healthy"
}

/// S3 client for MinIO
///
/// The bucket has to exist and allow anonymous reads for photo URLs to work.
fn object_store(minio: &MinioConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let store = AmazonS3Builder::new()
        .with_endpoint(&minio.endpoint)
        .with_bucket_name(&minio.bucket)
        .with_access_key_id(&minio.user)
        .with_secret_access_key(&minio.password)
        .with_region("us-east-1")
        .with_allow_http(minio.endpoint.starts_with("http://"))
        .with_virtual_hosted_style_request(false)
        .build()?;

    Ok(Arc::new(store))
}
