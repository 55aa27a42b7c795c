use crate::database::entity::{blog_post, user};
use crate::database::postgres_repo::{PostgresBlogPostRepository, PostgresUserRepository};
use blogforge_core::domain::{BlogPost, User};
use blogforge_core::error::RepoError;
use blogforge_core::ports::{BaseRepository, BlogPostRepository, UserRepository};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![blog_post::Model {
            id: post_id,
            user_id,
            title: "Test Post".to_owned(),
            source_link: "N/A".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresBlogPostRepository::new(db);

    let result: Option<BlogPost> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_posts_by_user_id() {
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            blog_post::Model {
                id: uuid::Uuid::new_v4(),
                user_id,
                title: "Newer".to_owned(),
                source_link: "https://youtu.be/dQw4w9WgXcQ".to_owned(),
                content: "Content".to_owned(),
                created_at: now.into(),
            },
            blog_post::Model {
                id: uuid::Uuid::new_v4(),
                user_id,
                title: "Older".to_owned(),
                source_link: "N/A".to_owned(),
                content: "Content".to_owned(),
                created_at: (now - chrono::TimeDelta::hours(1)).into(),
            },
        ]])
        .into_connection();

    let repo = PostgresBlogPostRepository::new(db);

    let posts = repo.find_by_user_id(user_id).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Newer");
}

// New rows arrive with their UUID key already set. Saving must still be an
// INSERT: an UPDATE against a fresh row matches nothing and fails.
#[tokio::test]
async fn test_save_new_user_issues_insert() {
    let new_user = User::new(
        "alice".to_owned(),
        "alice@example.com".to_owned(),
        "hash".to_owned(),
    );

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: new_user.id,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            is_admin: false,
            created_at: new_user.created_at.into(),
            updated_at: new_user.updated_at.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let saved = repo.save(new_user.clone()).await.unwrap();
    assert_eq!(saved.id, new_user.id);

    let log = repo.db.into_transaction_log();
    let statement = format!("{:?}", log[0]);
    assert!(
        statement.contains(r#"INSERT INTO "users""#),
        "expected an INSERT, got: {statement}"
    );
}

#[tokio::test]
async fn test_save_new_post_issues_insert() {
    let post = BlogPost::new(
        uuid::Uuid::new_v4(),
        "Test Post".to_owned(),
        None,
        "Content".to_owned(),
    );

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![blog_post::Model {
            id: post.id,
            user_id: post.user_id,
            title: post.title.clone(),
            source_link: post.source_link.clone(),
            content: post.content.clone(),
            created_at: post.created_at.into(),
        }]])
        .into_connection();

    let repo = PostgresBlogPostRepository::new(db);

    let saved = repo.save(post.clone()).await.unwrap();
    assert_eq!(saved.source_link, "N/A");

    let log = repo.db.into_transaction_log();
    let statement = format!("{:?}", log[0]);
    assert!(
        statement.contains(r#"INSERT INTO "blog_posts""#),
        "expected an INSERT, got: {statement}"
    );
}

#[tokio::test]
async fn test_duplicate_key_maps_to_constraint_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"users_email_key\"".to_owned(),
        ))])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let err = repo
        .save(User::new(
            "alice".to_owned(),
            "alice@example.com".to_owned(),
            "hash".to_owned(),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_find_user_by_username() {
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            is_admin: false,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "alice@example.com");
}
