//! Transcript acquisition strategies.
//!
//! Exactly one strategy is active per deployment, selected by the
//! `TRANSCRIPT_STRATEGY` configuration value. The pipeline only ever sees
//! the `TranscriptProvider` trait.

mod audio;
mod captions;

pub use audio::{AudioPipelineConfig, AudioPipelineProvider};
pub use captions::CaptionsProvider;

use std::str::FromStr;

use async_trait::async_trait;

use blogforge_core::ports::{SourceError, TranscriptProvider};

/// Which transcript acquisition strategy is wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptStrategy {
    /// Only request-supplied transcripts; link-based acquisition disabled.
    #[default]
    Direct,
    /// YouTube's own caption tracks.
    Captions,
    /// yt-dlp audio download plus a speech-to-text service.
    Audio,
}

impl TranscriptStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptStrategy::Direct => "direct",
            TranscriptStrategy::Captions => "captions",
            TranscriptStrategy::Audio => "audio",
        }
    }
}

impl FromStr for TranscriptStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(TranscriptStrategy::Direct),
            "captions" => Ok(TranscriptStrategy::Captions),
            "audio" => Ok(TranscriptStrategy::Audio),
            other => Err(format!("unknown transcript strategy: {other}")),
        }
    }
}

/// Provider for the `direct` strategy. Request-supplied transcripts never
/// reach the provider, so any call here means the caller sent a link while
/// link-based acquisition is disabled.
pub struct DirectOnlyProvider;

#[async_trait]
impl TranscriptProvider for DirectOnlyProvider {
    async fn fetch(&self, _video_id: &str) -> Result<String, SourceError> {
        Err(SourceError::InvalidInput(
            "This server only accepts raw transcripts; supply a transcript instead of a link."
                .to_string(),
        ))
    }
}
