//! Video metadata via the YouTube Data API v3.
//!
//! A single read-only `videos?part=snippet` call with an API key. No
//! user-context auth involved.

use async_trait::async_trait;
use serde::Deserialize;

use blogforge_core::ports::{MetadataFetcher, SourceError, VideoMetadata};

const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
    description: Option<String>,
}

/// Metadata client. Constructed without a key it is disabled and every call
/// fails fast with a configuration error instead of faulting mid-request.
pub struct YouTubeMetadataClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl YouTubeMetadataClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("YOUTUBE_API_KEY not set; metadata lookups are disabled");
        }
        Self { client, api_key }
    }

    /// Whether the client holds a credential.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl MetadataFetcher for YouTubeMetadataClient {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, SourceError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SourceError::NotConfigured("metadata client has no API key".to_string())
        })?;

        tracing::debug!(%video_id, "fetching video metadata");

        let response = self
            .client
            .get(VIDEOS_URL)
            .query(&[("part", "snippet"), ("id", video_id), ("key", api_key)])
            .send()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "metadata API error");
            return Err(SourceError::Upstream(format!(
                "metadata API returned {status}"
            )));
        }

        let list: VideoListResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        let item = list
            .items
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(format!("no video with id {video_id}")))?;

        Ok(VideoMetadata {
            title: item.snippet.title,
            channel: item.snippet.channel_title,
            description: item.snippet.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_client_fails_fast() {
        let client = YouTubeMetadataClient::new(reqwest::Client::new(), None);
        assert!(!client.is_configured());

        let err = client.fetch("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured(_)));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "items": [
                {"snippet": {"title": "A Video", "channelTitle": "A Channel", "description": "d"}}
            ]
        }"#;
        let parsed: VideoListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].snippet.title, "A Video");
    }

    #[test]
    fn test_empty_items_parses() {
        let parsed: VideoListResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }
}
