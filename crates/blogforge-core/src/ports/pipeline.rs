//! Ports for the generate-blog pipeline's external collaborators.
//!
//! Every upstream call returns a [`SourceError`] instead of throwing past
//! the component boundary; the pipeline folds these into stage-tagged
//! failures for the HTTP layer.

use async_trait::async_trait;
use thiserror::Error;

/// Typed failure for any upstream-facing component.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The component was constructed without its required credential and is
    /// disabled; every call fails fast with this variant.
    #[error("component not configured: {0}")]
    NotConfigured(String),

    /// The caller's input cannot be serviced (e.g. the strategy needs a
    /// transcript the request did not carry).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The upstream service answered but had nothing for this reference.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport, auth, or malformed-response failure at the upstream.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Descriptive metadata for a resolved video.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: Option<String>,
    pub description: Option<String>,
}

/// Read-only lookup against a video metadata service.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, SourceError>;
}

/// Obtains transcript text for a video identifier.
///
/// Exactly one implementation is wired in at startup; the pipeline never
/// knows which strategy is behind the trait.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<String, SourceError>;
}

/// Issues a single generative-model call and returns the raw response text.
/// Delimiter parsing happens in [`crate::article`].
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self, transcript: &str) -> Result<String, SourceError>;
}
