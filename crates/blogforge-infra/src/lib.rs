//! # Blogforge Infrastructure
//!
//! Concrete implementations of the ports defined in `blogforge-core`:
//! database repositories, authentication, and the upstream HTTP clients for
//! metadata, transcript acquisition, and article generation.

pub mod auth;
pub mod database;
pub mod generate;
pub mod transcript;
pub mod youtube;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::DatabaseConnections;
pub use generate::GeminiGenerator;
pub use transcript::TranscriptStrategy;
pub use youtube::YouTubeMetadataClient;
