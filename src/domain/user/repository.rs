//! Staff user store contract

use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with a conflict if the email is taken.
    async fn insert(&self, user: User) -> DomainResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find user by login email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Replace an existing user; version-checked.
    async fn update(&self, user: User) -> DomainResult<()>;

    /// Delete a user by ID
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// All users
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> DomainResult<u64>;
}
