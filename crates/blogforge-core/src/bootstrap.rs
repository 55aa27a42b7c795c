//! One-time administrative bootstrap.
//!
//! Creates the admin account from environment-provided credentials if it
//! does not exist yet. Idempotent: running it again is a no-op.

use std::sync::Arc;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{PasswordService, UserRepository};

/// Admin credentials read from the environment by the server's config layer.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Ensure the admin account exists. Returns `true` when an account was
/// created, `false` when one already existed.
pub async fn ensure_admin_account(
    users: &Arc<dyn UserRepository>,
    passwords: &Arc<dyn PasswordService>,
    admin: &AdminBootstrap,
) -> Result<bool, DomainError> {
    let existing = users
        .find_by_username(&admin.username)
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    if existing.is_some() {
        tracing::info!(username = %admin.username, "admin account already exists");
        return Ok(false);
    }

    let password_hash = passwords
        .hash(&admin.password)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let user = User::new_admin(admin.username.clone(), admin.email.clone(), password_hash);
    users
        .save(user)
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    tracing::info!(username = %admin.username, "admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::ports::{AuthError, BaseRepository};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct MemUsers {
        by_name: Mutex<HashMap<String, User>>,
    }

    #[async_trait]
    impl BaseRepository<User, Uuid> for MemUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self
                .by_name
                .lock()
                .unwrap()
                .values()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn save(&self, user: User) -> Result<User, RepoError> {
            self.by_name
                .lock()
                .unwrap()
                .insert(user.username.clone(), user.clone());
            Ok(user)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MemUsers {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
            Ok(self.by_name.lock().unwrap().get(username).cloned())
        }
    }

    struct PlainPasswords;

    impl PasswordService for PlainPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    fn admin() -> AdminBootstrap {
        AdminBootstrap {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "s3cret".into(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_creates_admin_once() {
        let users: Arc<dyn UserRepository> = Arc::new(MemUsers::default());
        let passwords: Arc<dyn PasswordService> = Arc::new(PlainPasswords);

        let created = ensure_admin_account(&users, &passwords, &admin()).await.unwrap();
        assert!(created);

        // Second run is a no-op.
        let created_again = ensure_admin_account(&users, &passwords, &admin()).await.unwrap();
        assert!(!created_again);

        let stored = users.find_by_username("admin").await.unwrap().unwrap();
        assert!(stored.is_admin);
        assert_eq!(stored.password_hash, "hashed:s3cret");
    }
}
