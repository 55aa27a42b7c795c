//! Gemini article generation.
//!
//! One `generateContent` call per request asking the model for a title and
//! an article separated by the delimiter token; splitting happens upstream
//! in `blogforge_core::article`. No retries: a failed call maps straight to
//! a generation error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use blogforge_core::article::CONTENT_DELIMITER;
use blogforge_core::ports::{ArticleGenerator, SourceError};

const GENERATE_CONTENT_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Conservative sampling: coherence over variety.
const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Gemini-backed article generator. Without an API key it is disabled and
/// every call fails fast with a configuration error.
pub struct GeminiGenerator {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(client: reqwest::Client, config: GeminiConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; article generation is disabled");
        }
        Self { client, config }
    }

    /// Whether the generator holds a credential.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn build_prompt(transcript: &str) -> String {
        format!(
            "Based on the following transcript, perform two tasks:\n\
             1. Generate a concise and compelling blog post title (no more than 10 words, no quotes).\n\
             2. Write a comprehensive and well-structured blog article. The content should be \
             engaging and easy to read. Avoid a direct conversational tone.\n\n\
             Separate the title and the article with the special delimiter '{CONTENT_DELIMITER}'.\n\n\
             Transcript: {transcript}\n\n\
             Title and Article:"
        )
    }
}

#[async_trait]
impl ArticleGenerator for GeminiGenerator {
    async fn generate(&self, transcript: &str) -> Result<String, SourceError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            SourceError::NotConfigured("generator has no API key".to_string())
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(transcript),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{GENERATE_CONTENT_BASE}/{}:generateContent?key={api_key}",
            self.config.model
        );

        tracing::debug!(model = %self.config.model, "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "generateContent error");
            return Err(SourceError::Upstream(format!(
                "generation API returned {status}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        extract_response_text(&parsed)
    }
}

fn extract_response_text(response: &GenerateContentResponse) -> Result<String, SourceError> {
    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim())
        .unwrap_or("");

    if text.is_empty() {
        return Err(SourceError::Upstream(
            "model returned no text content".to_string(),
        ));
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_generator_fails_fast() {
        let generator = GeminiGenerator::new(reqwest::Client::new(), GeminiConfig::default());
        assert!(!generator.is_configured());

        let err = generator.generate("a transcript").await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured(_)));
    }

    #[test]
    fn test_prompt_carries_delimiter_and_transcript() {
        let prompt = GeminiGenerator::build_prompt("the transcript text");
        assert!(prompt.contains(CONTENT_DELIMITER));
        assert!(prompt.contains("the transcript text"));
        assert!(prompt.contains("no more than 10 words"));
    }

    #[test]
    fn test_extract_response_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Title\n---CONTENT---\nArticle."}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            extract_response_text(&parsed).unwrap(),
            "Title\n---CONTENT---\nArticle."
        );
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_response_text(&parsed),
            Err(SourceError::Upstream(_))
        ));
    }

    #[test]
    fn test_blank_text_is_an_error() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(extract_response_text(&parsed).is_err());
    }
}
