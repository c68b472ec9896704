//! Server Configuration
//!
//! Everything the binary reads from the environment. Connection strings fall
//! back to the `POSTGRES_*`, `REDIS_*` and `MINIO_*` parts when the full URL
//! is not set.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use cats::CatsConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub database_url: String,
    pub redis_url: String,
    pub minio: MinioConfig,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub cats: CatsConfig,
}

#[derive(Debug, Clone)]
pub struct MinioConfig {
    /// Endpoint the server talks to
    pub endpoint: String,
    /// Endpoint put into photo URLs handed to clients
    pub public_url: String,
    pub user: String,
    pub password: String,
    pub bucket: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = var_or("BACKEND_HOST", "0.0.0.0");
        let port: u16 = parse_or("BACKEND_PORT", 8080)?;
        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                var_or("POSTGRES_USER", "postgres"),
                var_or("POSTGRES_PASSWORD", "postgres"),
                var_or("POSTGRES_HOST", "localhost"),
                var_or("POSTGRES_PORT", "5432"),
                var_or("POSTGRES_DB", "app"),
            )
        });

        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| {
            format!(
                "redis://{}:{}@{}:{}/{}",
                var_or("REDIS_USER", "redis"),
                var_or("REDIS_PASSWORD", "redis"),
                var_or("REDIS_HOST", "localhost"),
                var_or("REDIS_PORT", "6379"),
                var_or("REDIS_DB", "0"),
            )
        });

        let endpoint = env::var("MINIO_ENDPOINT").unwrap_or_else(|_| {
            format!(
                "http://{}:{}",
                var_or("MINIO_HOST", "localhost"),
                var_or("MINIO_PORT", "9000"),
            )
        });
        let minio = MinioConfig {
            public_url: var_or("MINIO_PUBLIC_URL", &endpoint),
            endpoint,
            user: var_or("MINIO_USER", "minio"),
            password: var_or("MINIO_PASSWORD", "minio"),
            bucket: var_or("MINIO_BUCKET", "cat-photo-bucket"),
        };

        let frontend_origins = var_or(
            "FRONTEND_ORIGINS",
            "http://localhost:3000,http://127.0.0.1:3000",
        )
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

        let request_timeout = Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 5)?);
        let upload_timeout = Duration::from_secs(parse_or("FILE_REQUEST_TIMEOUT_SECS", 30)?);

        // Dev builds may run without a secret; tokens then die with the process
        let base = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => AuthConfig {
                jwt_secret: secret.into_bytes(),
                ..AuthConfig::default()
            },
            _ if cfg!(debug_assertions) => AuthConfig::development(),
            _ => bail!("JWT_SECRET must be set in production"),
        };
        let auth = AuthConfig {
            access_token_ttl: Duration::from_secs(parse_or("ACCESS_TOKEN_TTL_SECS", 300)?),
            refresh_token_ttl: Duration::from_secs(parse_or("REFRESH_TOKEN_TTL_SECS", 2_592_000)?),
            track_access_tokens: parse_or("TRACK_ACCESS_TOKENS", false)?,
            request_timeout,
            ..base
        };

        let cats = CatsConfig {
            request_timeout,
            upload_timeout,
            ..CatsConfig::default()
        };

        Ok(Self {
            addr,
            database_url,
            redis_url,
            minio,
            frontend_origins,
            auth,
            cats,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
