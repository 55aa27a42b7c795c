//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; there is no global mutable client
//! state. Components whose credentials are missing get constructed in a
//! disabled state by the infra layer and fail fast per call.

use std::env;
use std::path::PathBuf;

use blogforge_core::bootstrap::AdminBootstrap;
use blogforge_infra::database::DatabaseConfig;
use blogforge_infra::generate::{DEFAULT_MODEL, GeminiConfig};
use blogforge_infra::transcript::AudioPipelineConfig;
use blogforge_infra::TranscriptStrategy;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub gemini: GeminiConfig,
    pub youtube_api_key: Option<String>,
    pub transcript_strategy: TranscriptStrategy,
    pub audio: AudioPipelineConfig,
    pub admin: Option<AdminBootstrap>,
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

        let gemini = GeminiConfig {
            api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        };

        let transcript_strategy = env::var("TRANSCRIPT_STRATEGY")
            .ok()
            .map(|s| {
                s.parse().unwrap_or_else(|e: String| {
                    tracing::warn!("{e}; falling back to the direct strategy");
                    TranscriptStrategy::Direct
                })
            })
            .unwrap_or_default();

        let audio = AudioPipelineConfig {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            cookies_file: env::var("YTDLP_COOKIES").ok().map(PathBuf::from),
        };

        // Bootstrap only when both credentials are explicitly provided; a
        // defaulted admin password is worse than no admin account.
        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap {
                    username,
                    password,
                    email: env::var("ADMIN_EMAIL")
                        .unwrap_or_else(|_| "admin@example.com".to_string()),
                })
            }
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            gemini,
            youtube_api_key: env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.is_empty()),
            transcript_strategy,
            audio,
            admin,
        }
    }
}
