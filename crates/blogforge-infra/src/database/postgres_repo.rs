//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use blogforge_core::domain::{BlogPost, User};
use blogforge_core::error::RepoError;
use blogforge_core::ports::{BlogPostRepository, UserRepository};

use super::entity::blog_post::{self, Entity as BlogPostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog post repository.
pub type PostgresBlogPostRepository = PostgresBaseRepository<BlogPostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn find_by_user_id(&self, user_id: uuid::Uuid) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogPostEntity::find()
            .filter(blog_post::Column::UserId.eq(user_id))
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
