//! Staff user management and credential validation

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::{hash_password, verify_password};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a user with a bcrypt-hashed password.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        let password_hash = hash_password(password)
            .map_err(|_| DomainError::Validation("password could not be hashed".to_string()))?;

        let user = User::new(
            Uuid::new_v4().to_string(),
            email,
            password_hash,
            full_name,
            role,
        );
        self.repos.users().insert(user.clone()).await?;

        info!(user_id = %user.id, email, "User created");
        Ok(user)
    }

    /// Update everything except the password hash; there is no exposed
    /// password-change path.
    pub async fn update(
        &self,
        id: &str,
        email: &str,
        full_name: &str,
        role: UserRole,
        is_active: bool,
    ) -> DomainResult<()> {
        let mut existing = self
            .repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        existing.email = email.to_string();
        existing.full_name = full_name.to_string();
        existing.role = role;
        existing.is_active = is_active;
        self.repos.users().update(existing).await?;

        info!(user_id = %id, "User updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.repos.users().delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repos.users().find_by_id(id).await
    }

    pub async fn get_all(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    /// Check a credential pair. Unknown email, disabled account, and a
    /// wrong password all come back as None; the caller cannot tell
    /// which it was.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let Some(user) = self.repos.users().find_by_email(email).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }
        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        Ok(valid.then_some(user))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryStore;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn create_hashes_password() {
        let svc = service();
        let user = svc
            .create("ops@evcharge.lk", "s3cret-pass", "Ops", UserRole::Backoffice)
            .await
            .unwrap();
        assert_ne!(user.password_hash, "s3cret-pass");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let svc = service();
        svc.create("ops@evcharge.lk", "pw-one", "Ops", UserRole::Backoffice)
            .await
            .unwrap();
        let err = svc
            .create("ops@evcharge.lk", "pw-two", "Other", UserRole::StationOperator)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn valid_credentials_return_user() {
        let svc = service();
        svc.create("ops@evcharge.lk", "s3cret-pass", "Ops", UserRole::Backoffice)
            .await
            .unwrap();

        let user = svc
            .validate_credentials("ops@evcharge.lk", "s3cret-pass")
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_both_return_none() {
        let svc = service();
        svc.create("ops@evcharge.lk", "s3cret-pass", "Ops", UserRole::Backoffice)
            .await
            .unwrap();

        assert!(svc
            .validate_credentials("ops@evcharge.lk", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(svc
            .validate_credentials("nobody@evcharge.lk", "s3cret-pass")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn disabled_account_cannot_log_in() {
        let svc = service();
        let user = svc
            .create("ops@evcharge.lk", "s3cret-pass", "Ops", UserRole::Backoffice)
            .await
            .unwrap();
        svc.update(&user.id, "ops@evcharge.lk", "Ops", UserRole::Backoffice, false)
            .await
            .unwrap();

        assert!(svc
            .validate_credentials("ops@evcharge.lk", "s3cret-pass")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_does_not_touch_password() {
        let svc = service();
        let user = svc
            .create("ops@evcharge.lk", "s3cret-pass", "Ops", UserRole::Backoffice)
            .await
            .unwrap();

        svc.update(&user.id, "ops2@evcharge.lk", "Ops Two", UserRole::StationOperator, true)
            .await
            .unwrap();

        let stored = svc.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "ops2@evcharge.lk");
        assert_eq!(stored.role, UserRole::StationOperator);
        assert_eq!(stored.password_hash, user.password_hash);
    }
}
