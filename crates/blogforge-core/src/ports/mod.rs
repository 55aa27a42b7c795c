//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod pipeline;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use pipeline::{
    ArticleGenerator, MetadataFetcher, SourceError, TranscriptProvider, VideoMetadata,
};
pub use repository::{BaseRepository, BlogPostRepository, UserRepository};
