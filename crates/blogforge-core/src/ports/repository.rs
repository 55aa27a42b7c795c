use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Entities here are create-only; saving an
    /// already-persisted id is a constraint violation.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups. Email lookups are not
/// needed: uniqueness is enforced by the database constraint and surfaced
/// through `save`.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Blog post repository. Posts are immutable once created, so callers only
/// ever save new entities and read them back.
#[async_trait]
pub trait BlogPostRepository: BaseRepository<BlogPost, Uuid> {
    /// All posts owned by a user, newest first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError>;
}
