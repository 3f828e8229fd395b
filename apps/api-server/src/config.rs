//! Application configuration loaded from environment variables.

use std::env;

use baan_infra::database::DatabaseConfig;
use baan_infra::media::MediaConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Whether post reads are served without a session.
    pub public_reads: bool,
    pub database: Option<DatabaseConfig>,
    pub media: Option<MediaConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let media = env::var("MEDIA_UPLOAD_URL").ok().map(|upload_url| MediaConfig {
            upload_url,
            folder: env::var("MEDIA_FOLDER").unwrap_or_else(|_| "baanboard_posts".to_string()),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            public_reads: env::var("PUBLIC_READS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            database,
            media,
        }
    }
}
