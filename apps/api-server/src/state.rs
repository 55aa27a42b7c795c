//! Application state - shared across all handlers.

use std::sync::Arc;

use blogforge_core::pipeline::BlogPipeline;
use blogforge_core::ports::{
    ArticleGenerator, BlogPostRepository, MetadataFetcher, TranscriptProvider, UserRepository,
};
use blogforge_infra::database::{
    DatabaseConnections, InMemoryBlogPostRepository, InMemoryUserRepository,
    PostgresBlogPostRepository, PostgresUserRepository,
};
use blogforge_infra::transcript::{
    AudioPipelineProvider, CaptionsProvider, DirectOnlyProvider, TranscriptStrategy,
};
use blogforge_infra::{GeminiGenerator, YouTubeMetadataClient};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn BlogPostRepository>,
    pub pipeline: Arc<BlogPipeline>,
    pub transcript_strategy: TranscriptStrategy,
    pub generator_ready: bool,
    pub metadata_ready: bool,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::new();

        let metadata_client = Arc::new(YouTubeMetadataClient::new(
            http.clone(),
            config.youtube_api_key.clone(),
        ));
        let metadata_ready = metadata_client.is_configured();

        let transcripts: Arc<dyn TranscriptProvider> = match config.transcript_strategy {
            TranscriptStrategy::Direct => Arc::new(DirectOnlyProvider),
            TranscriptStrategy::Captions => Arc::new(CaptionsProvider::new(http.clone())),
            TranscriptStrategy::Audio => Arc::new(AudioPipelineProvider::new(
                http.clone(),
                config.audio.clone(),
            )),
        };
        tracing::info!(
            strategy = config.transcript_strategy.as_str(),
            "transcript strategy selected"
        );

        let generator = Arc::new(GeminiGenerator::new(http, config.gemini.clone()));
        let generator_ready = generator.is_configured();

        let pipeline = Arc::new(BlogPipeline::new(
            metadata_client as Arc<dyn MetadataFetcher>,
            transcripts,
            generator as Arc<dyn ArticleGenerator>,
        ));

        let (db, users, posts): (
            Option<Arc<DatabaseConnections>>,
            Arc<dyn UserRepository>,
            Arc<dyn BlogPostRepository>,
        ) = if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let users = Arc::new(PostgresUserRepository::new(conn.main.clone()));
                    let posts = Arc::new(PostgresBlogPostRepository::new(conn.main.clone()));
                    (Some(conn), users, posts)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (
                        None,
                        Arc::new(InMemoryUserRepository::new()),
                        Arc::new(InMemoryBlogPostRepository::new()),
                    )
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            (
                None,
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryBlogPostRepository::new()),
            )
        };

        tracing::info!("Application state initialized");

        Self {
            users,
            posts,
            pipeline,
            transcript_strategy: config.transcript_strategy,
            generator_ready,
            metadata_ready,
            db,
        }
    }
}
