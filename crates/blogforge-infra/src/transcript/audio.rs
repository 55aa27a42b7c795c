//! Audio-pipeline transcript acquisition.
//!
//! Downloads the best audio stream with yt-dlp into a request-scoped
//! temporary directory, uploads it to the Whisper transcription endpoint,
//! and returns the text. The temp directory is removed on every exit path,
//! success or failure, by the `TempDir` guard.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::multipart;
use tempfile::TempDir;
use tokio::process::Command;

use blogforge_core::ports::{SourceError, TranscriptProvider};

const TRANSCRIPTIONS_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

const WHISPER_MODEL: &str = "whisper-1";

/// Configuration for the audio strategy.
#[derive(Debug, Clone, Default)]
pub struct AudioPipelineConfig {
    /// Speech-to-text API credential. Without it the provider is disabled.
    pub api_key: Option<String>,
    /// Optional cookies file handed to yt-dlp for authenticated downloads.
    pub cookies_file: Option<PathBuf>,
}

/// Audio-download-then-transcribe provider.
pub struct AudioPipelineProvider {
    client: reqwest::Client,
    config: AudioPipelineConfig,
}

impl AudioPipelineProvider {
    pub fn new(client: reqwest::Client, config: AudioPipelineConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; audio transcription is disabled");
        }
        Self { client, config }
    }

    /// Run yt-dlp, extracting audio as mp3 into `dir`.
    async fn download_audio(&self, video_id: &str, dir: &Path) -> Result<PathBuf, SourceError> {
        let url = format!("https://www.youtube.com/watch?v={video_id}");
        let output_template = dir.join("%(id)s.%(ext)s");
        let output_path = dir.join(format!("{video_id}.mp3"));

        tracing::debug!(%video_id, "downloading audio via yt-dlp");

        let mut cmd = Command::new("yt-dlp");
        cmd.args([
            "--extract-audio",
            "--audio-format",
            "mp3",
            "--audio-quality",
            "9", // speech does not need high quality
            "--no-playlist",
            "-o",
        ])
        .arg(&output_template)
        .arg(&url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped());

        if let Some(cookies) = &self.config.cookies_file {
            cmd.arg("--cookies").arg(cookies);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotConfigured("yt-dlp is not installed on this server".to_string())
            } else {
                SourceError::Upstream(format!("failed to run yt-dlp: {e}"))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(%video_id, %stderr, "yt-dlp failed");
            return Err(SourceError::Upstream(format!(
                "yt-dlp exited with status {}",
                output.status
            )));
        }

        if !output_path.exists() {
            return Err(SourceError::Upstream(
                "yt-dlp did not produce the expected audio file".to_string(),
            ));
        }

        Ok(output_path)
    }

    /// Upload an audio file to the transcription endpoint.
    async fn transcribe_file(&self, api_key: &str, path: &Path) -> Result<String, SourceError> {
        let file_bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SourceError::Upstream(format!("failed to read audio file: {e}")))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let file_part = multipart::Part::bytes(file_bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", WHISPER_MODEL)
            .text("response_format", "json");

        let response = self
            .client
            .post(TRANSCRIPTIONS_URL)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "transcription API error");
            return Err(SourceError::Upstream(format!(
                "transcription API returned {status}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        extract_transcript_text(&json)
    }
}

#[async_trait]
impl TranscriptProvider for AudioPipelineProvider {
    async fn fetch(&self, video_id: &str) -> Result<String, SourceError> {
        let api_key = self
            .config
            .api_key
            .clone()
            .ok_or_else(|| SourceError::NotConfigured("audio provider has no API key".into()))?;

        // Dropped on every exit path below, deleting the audio file with it.
        let workdir = TempDir::new()
            .map_err(|e| SourceError::Upstream(format!("failed to create temp dir: {e}")))?;

        let audio_path = self.download_audio(video_id, workdir.path()).await?;
        let transcript = self.transcribe_file(&api_key, &audio_path).await?;

        Ok(transcript)
    }
}

fn extract_transcript_text(json: &serde_json::Value) -> Result<String, SourceError> {
    let text = json
        .get("text")
        .and_then(|t| t.as_str())
        .map(str::trim)
        .unwrap_or("");

    if text.is_empty() {
        return Err(SourceError::Upstream(
            "transcription service returned empty text".to_string(),
        ));
    }

    Ok(text.to_string())
}
