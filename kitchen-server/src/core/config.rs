//! Server configuration

use crate::reservations::ttl::{DEFAULT_TTL_SECONDS, DEFAULT_WARNING_SECONDS};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 5000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | RESERVATION_TTL_SECONDS | 600 | Initial reservation TTL |
/// | RESERVATION_WARNING_THRESHOLD_SECONDS | 30 | Initial client warning threshold |
/// | EXPIRATION_INTERVAL_SECONDS | 30 | Background expiry sweep interval |
/// | INTERNAL_EXPIRE_SECRET | (empty) | Shared secret for /api/internal/expire-once |
/// | SEED_DEMO_DATA | true | Seed demo inventory when stores are empty |
/// | LOG_DIR | (none) | Optional rolling log file directory |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Initial reservation TTL in seconds (runtime-mutable afterwards)
    pub reservation_ttl_seconds: u32,
    /// Initial warning threshold in seconds (runtime-mutable afterwards)
    pub reservation_warning_threshold_seconds: u32,
    /// Background expiry sweep interval in seconds
    pub expiration_interval_seconds: u64,
    /// Shared secret guarding the internal expire-once endpoint;
    /// empty disables the endpoint
    pub internal_expire_secret: String,
    /// Seed demo inventory and menu when the stores are empty
    pub seed_demo_data: bool,
    /// Optional log file directory
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            reservation_ttl_seconds: std::env::var("RESERVATION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_SECONDS),
            reservation_warning_threshold_seconds: std::env::var(
                "RESERVATION_WARNING_THRESHOLD_SECONDS",
            )
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WARNING_SECONDS),
            expiration_interval_seconds: std::env::var("EXPIRATION_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            internal_expire_secret: std::env::var("INTERNAL_EXPIRE_SECRET").unwrap_or_default(),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 5000,
            environment: "development".into(),
            reservation_ttl_seconds: DEFAULT_TTL_SECONDS,
            reservation_warning_threshold_seconds: DEFAULT_WARNING_SECONDS,
            expiration_interval_seconds: 30,
            internal_expire_secret: String::new(),
            seed_demo_data: true,
            log_dir: None,
        }
    }
}
