//! The generate-blog pipeline.
//!
//! `START -> (transcript?) -> DIRECT | (link?) -> RESOLVE -> FETCH_METADATA
//! -> ACQUIRE_TRANSCRIPT -> GENERATE`. Any stage failure short-circuits; the
//! caller persists only after full success. No retries, no partial results.

use std::sync::Arc;

use thiserror::Error;

use crate::article::{self, Article};
use crate::ports::{ArticleGenerator, MetadataFetcher, SourceError, TranscriptProvider};
use crate::video;

/// Pipeline stage names, used for logging and error mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    FetchMetadata,
    FetchTranscript,
    Generate,
}

impl PipelineStage {
    /// Generic user-facing message for a failure at this stage. Upstream
    /// detail stays in the server logs.
    pub fn failure_message(&self) -> &'static str {
        match self {
            PipelineStage::FetchMetadata => "Failed to look up the video.",
            PipelineStage::FetchTranscript => "Failed to obtain a transcript for the video.",
            PipelineStage::Generate => "Failed to generate the blog article.",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::FetchMetadata => write!(f, "fetch_metadata"),
            PipelineStage::FetchTranscript => write!(f, "fetch_transcript"),
            PipelineStage::Generate => write!(f, "generate"),
        }
    }
}

/// Pipeline failure, either the request itself or a stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: PipelineStage,
        source: SourceError,
    },
}

/// What the caller wants generated.
#[derive(Debug, Clone, Default)]
pub struct BlogRequest {
    pub title: Option<String>,
    pub transcript: Option<String>,
    pub link: Option<String>,
}

/// A fully generated post, ready to persist.
#[derive(Debug, Clone)]
pub struct GeneratedPost {
    pub title: String,
    pub source_link: Option<String>,
    pub content: String,
}

/// Orchestrates resolver, metadata, transcript, and generator ports.
pub struct BlogPipeline {
    metadata: Arc<dyn MetadataFetcher>,
    transcripts: Arc<dyn TranscriptProvider>,
    generator: Arc<dyn ArticleGenerator>,
}

impl BlogPipeline {
    pub fn new(
        metadata: Arc<dyn MetadataFetcher>,
        transcripts: Arc<dyn TranscriptProvider>,
        generator: Arc<dyn ArticleGenerator>,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            generator,
        }
    }

    /// Run the pipeline for one request.
    pub async fn run(&self, request: &BlogRequest) -> Result<GeneratedPost, PipelineError> {
        let user_title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        // Direct path: a supplied transcript skips resolution entirely.
        if let Some(transcript) = request
            .transcript
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            let article = self.generate(transcript, user_title).await?;
            return Ok(GeneratedPost {
                title: article.title,
                source_link: request.link.clone(),
                content: article.body,
            });
        }

        let link = request
            .link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                PipelineError::InvalidRequest("A transcript or a video link is required.".into())
            })?;

        let video_id = video::extract_video_id(link).ok_or_else(|| {
            PipelineError::InvalidRequest(format!("Unrecognized video link: {link}"))
        })?;

        tracing::info!(%video_id, "resolved video link");

        let metadata = self
            .metadata
            .fetch(&video_id)
            .await
            .map_err(|source| PipelineError::Stage {
                stage: PipelineStage::FetchMetadata,
                source,
            })?;

        let transcript =
            self.transcripts
                .fetch(&video_id)
                .await
                .map_err(|source| PipelineError::Stage {
                    stage: PipelineStage::FetchTranscript,
                    source,
                })?;

        // User title beats the video title, which beats the model's own.
        let preferred = user_title.or(Some(metadata.title.as_str()));
        let article = self.generate(&transcript, preferred).await?;

        Ok(GeneratedPost {
            title: article.title,
            source_link: Some(link.to_string()),
            content: article.body,
        })
    }

    async fn generate(
        &self,
        transcript: &str,
        preferred_title: Option<&str>,
    ) -> Result<Article, PipelineError> {
        let raw = self
            .generator
            .generate(transcript)
            .await
            .map_err(|source| PipelineError::Stage {
                stage: PipelineStage::Generate,
                source,
            })?;

        article::compose_article(&raw, preferred_title).ok_or(PipelineError::Stage {
            stage: PipelineStage::Generate,
            source: SourceError::Upstream("model returned an empty article".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::VideoMetadata;
    use async_trait::async_trait;

    struct FakeMetadata {
        title: &'static str,
    }

    #[async_trait]
    impl MetadataFetcher for FakeMetadata {
        async fn fetch(&self, _video_id: &str) -> Result<VideoMetadata, SourceError> {
            Ok(VideoMetadata {
                title: self.title.to_string(),
                channel: None,
                description: None,
            })
        }
    }

    struct FakeTranscripts {
        text: &'static str,
    }

    #[async_trait]
    impl TranscriptProvider for FakeTranscripts {
        async fn fetch(&self, _video_id: &str) -> Result<String, SourceError> {
            Ok(self.text.to_string())
        }
    }

    struct FakeGenerator {
        response: &'static str,
    }

    #[async_trait]
    impl ArticleGenerator for FakeGenerator {
        async fn generate(&self, _transcript: &str) -> Result<String, SourceError> {
            Ok(self.response.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl ArticleGenerator for FailingGenerator {
        async fn generate(&self, _transcript: &str) -> Result<String, SourceError> {
            Err(SourceError::Upstream("503".into()))
        }
    }

    fn pipeline(generator: Arc<dyn ArticleGenerator>) -> BlogPipeline {
        BlogPipeline::new(
            Arc::new(FakeMetadata {
                title: "Video Title",
            }),
            Arc::new(FakeTranscripts {
                text: "transcript from captions",
            }),
            generator,
        )
    }

    #[tokio::test]
    async fn test_direct_transcript_skips_resolution() {
        let p = pipeline(Arc::new(FakeGenerator {
            response: "Model Title\n---CONTENT---\nGenerated body.",
        }));
        let post = p
            .run(&BlogRequest {
                transcript: Some("Today we discuss sorting algorithms...".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(post.title, "Model Title");
        assert_eq!(post.content, "Generated body.");
        assert!(post.source_link.is_none());
    }

    #[tokio::test]
    async fn test_user_title_overrides_model_title() {
        let p = pipeline(Arc::new(FakeGenerator {
            response: "Model Title\n---CONTENT---\nBody.",
        }));
        let post = p
            .run(&BlogRequest {
                title: Some("Chosen Title".into()),
                transcript: Some("some transcript".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(post.title, "Chosen Title");
    }

    #[tokio::test]
    async fn test_link_flow_uses_metadata_title() {
        let p = pipeline(Arc::new(FakeGenerator {
            response: "Model Title\n---CONTENT---\nBody.",
        }));
        let post = p
            .run(&BlogRequest {
                link: Some("https://youtu.be/dQw4w9WgXcQ".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(post.title, "Video Title");
        assert_eq!(post.source_link.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_missing_transcript_and_link_rejected() {
        let p = pipeline(Arc::new(FakeGenerator { response: "x" }));
        let err = p.run(&BlogRequest::default()).await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_unresolvable_link_rejected() {
        let p = pipeline(Arc::new(FakeGenerator { response: "x" }));
        let err = p
            .run(&BlogRequest {
                link: Some("https://example.com/not-a-video".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_generator_failure_is_stage_tagged() {
        let p = pipeline(Arc::new(FailingGenerator));
        let err = p
            .run(&BlogRequest {
                transcript: Some("transcript".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            PipelineError::Stage { stage, .. } => assert_eq!(stage, PipelineStage::Generate),
            other => panic!("expected stage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_whitespace_transcript_falls_through_to_link_check() {
        let p = pipeline(Arc::new(FakeGenerator { response: "x" }));
        let err = p
            .run(&BlogRequest {
                transcript: Some("   ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRequest(_)));
    }
}
