use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::moderation::ModerationSettings;
use crate::workflows::photos::PhotoIntakeSettings;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the marketplace service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub photos: PhotoIntakeSettings,
    pub moderation: ModerationSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = read_flag("APP_LOG_ANSI", false)?;

        let photo_defaults = PhotoIntakeSettings::default();
        let photos = PhotoIntakeSettings {
            max_photos: read_number("PHOTO_MAX_PER_LISTING", photo_defaults.max_photos)?,
            max_file_bytes: read_number("PHOTO_MAX_FILE_BYTES", photo_defaults.max_file_bytes)?,
            tick_interval: read_millis("PHOTO_TICK_MS", photo_defaults.tick_interval)?,
            settle_delay: read_millis("PHOTO_SETTLE_MS", photo_defaults.settle_delay)?,
        };

        let moderation_defaults = ModerationSettings::default();
        let page_size = read_number("MODERATION_PAGE_SIZE", moderation_defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        let moderation = ModerationSettings {
            review_latency: read_millis(
                "MODERATION_LATENCY_MS",
                moderation_defaults.review_latency,
            )?,
            page_size,
            reviewer: env::var("MODERATION_REVIEWER").unwrap_or(moderation_defaults.reviewer),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            photos,
            moderation,
        })
    }
}

fn read_number<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

fn read_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { key, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

fn read_millis(key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    read_number(key, default_ms).map(Duration::from_millis)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be true or false, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
    #[error("MODERATION_PAGE_SIZE must be at least 1")]
    InvalidPageSize,
}
