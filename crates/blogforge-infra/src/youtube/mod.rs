//! YouTube metadata lookups.

mod metadata;

pub use metadata::YouTubeMetadataClient;
