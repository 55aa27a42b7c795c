//! # Blogforge Core
//!
//! The domain layer of Blogforge.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, ports, the video-link resolver, article composition, and the
//! generate-blog pipeline.

pub mod article;
pub mod bootstrap;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod video;

pub use error::DomainError;
