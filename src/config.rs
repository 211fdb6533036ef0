//! Application configuration loaded from environment variables.

use chrono::{FixedOffset, Offset, Utc};
use std::env;

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Cloud Firestore (or the emulator if FIRESTORE_EMULATOR_HOST is set)
    Firestore,
    /// Process-local maps, for local development only
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Storage backend selection
    pub storage_backend: StorageBackend,
    /// Offset that defines calendar-day boundaries for scheduling and analytics
    pub timezone: FixedOffset,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage_backend: StorageBackend::Memory,
            timezone: utc_offset(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => parse_storage_backend(&raw)?,
            Err(_) => StorageBackend::Firestore,
        };

        let timezone = match env::var("ACTIVITY_TIMEZONE") {
            Ok(raw) => parse_timezone(&raw)?,
            Err(_) => utc_offset(),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            storage_backend,
            timezone,
        })
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn parse_storage_backend(raw: &str) -> Result<StorageBackend, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "firestore" => Ok(StorageBackend::Firestore),
        "memory" => Ok(StorageBackend::Memory),
        other => Err(ConfigError::Invalid {
            key: "STORAGE_BACKEND",
            value: other.to_string(),
        }),
    }
}

/// Parse `UTC`, `Z`, or a fixed offset like `+05:30` / `-08:00`.
pub fn parse_timezone(raw: &str) -> Result<FixedOffset, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return Ok(utc_offset());
    }
    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| ConfigError::Invalid {
            key: "ACTIVITY_TIMEZONE",
            value: trimmed.to_string(),
        })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
