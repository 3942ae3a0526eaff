//! EV owner store contract

use async_trait::async_trait;

use super::model::EvOwner;
use crate::domain::DomainResult;

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Insert a new owner. The NIC is the store key; a duplicate NIC
    /// fails with a conflict at the store level, so two concurrent
    /// creates cannot both succeed.
    async fn insert(&self, owner: EvOwner) -> DomainResult<()>;

    /// Find owner by NIC (exact, case-sensitive)
    async fn find_by_nic(&self, nic: &str) -> DomainResult<Option<EvOwner>>;

    /// Replace an existing owner; version-checked.
    async fn update(&self, owner: EvOwner) -> DomainResult<()>;

    /// Delete an owner by NIC
    async fn delete(&self, nic: &str) -> DomainResult<()>;

    /// All owners
    async fn find_all(&self) -> DomainResult<Vec<EvOwner>>;

    /// Total number of owners
    async fn count(&self) -> DomainResult<u64>;
}
