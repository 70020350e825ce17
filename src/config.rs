use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

/// Fallback secret so a bare `cargo run` works. Change in production.
pub const DEV_SESSION_SECRET: &str = "supersecretkey";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:health.db".into());
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").unwrap_or_else(|_| DEV_SESSION_SECRET.into()),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "health-coach".into()),
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(12 * 60),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}
