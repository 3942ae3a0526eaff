//! EV owner registry

use std::sync::Arc;

use tracing::info;

use crate::domain::{ActiveStatus, DomainError, DomainResult, EvOwner, RepositoryProvider};

pub struct OwnerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl OwnerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register an owner. The NIC must be non-blank and unused; the
    /// store's key uniqueness rejects duplicates, so two concurrent
    /// creates with the same NIC cannot both succeed. New owners are
    /// always active.
    pub async fn create(&self, mut owner: EvOwner) -> DomainResult<EvOwner> {
        if owner.nic.trim().is_empty() {
            return Err(DomainError::Validation("NIC is required".to_string()));
        }
        owner.status = ActiveStatus::Active;
        owner.version = 0;
        self.repos.owners().insert(owner.clone()).await?;

        info!(nic = %owner.nic, "Owner created");
        Ok(owner)
    }

    /// Replace every mutable field; the NIC itself is immutable.
    pub async fn update(
        &self,
        nic: &str,
        name: &str,
        email: Option<String>,
        phone: Option<String>,
        vehicle_details: Option<String>,
        status: ActiveStatus,
    ) -> DomainResult<()> {
        let mut existing = self.get_existing(nic).await?;
        existing.name = name.to_string();
        existing.email = email;
        existing.phone = phone;
        existing.vehicle_details = vehicle_details;
        existing.status = status;
        self.repos.owners().update(existing).await?;

        info!(nic = %nic, "Owner updated");
        Ok(())
    }

    pub async fn delete(&self, nic: &str) -> DomainResult<()> {
        self.repos.owners().delete(nic).await?;
        info!(nic = %nic, "Owner deleted");
        Ok(())
    }

    pub async fn activate(&self, nic: &str) -> DomainResult<()> {
        self.set_status(nic, ActiveStatus::Active).await
    }

    pub async fn deactivate(&self, nic: &str) -> DomainResult<()> {
        self.set_status(nic, ActiveStatus::Inactive).await
    }

    pub async fn get_by_nic(&self, nic: &str) -> DomainResult<Option<EvOwner>> {
        self.repos.owners().find_by_nic(nic).await
    }

    pub async fn get_all(&self) -> DomainResult<Vec<EvOwner>> {
        self.repos.owners().find_all().await
    }

    async fn set_status(&self, nic: &str, status: ActiveStatus) -> DomainResult<()> {
        let mut existing = self.get_existing(nic).await?;
        existing.status = status;
        self.repos.owners().update(existing).await?;

        info!(nic = %nic, status = %status, "Owner status changed");
        Ok(())
    }

    async fn get_existing(&self, nic: &str) -> DomainResult<EvOwner> {
        self.repos
            .owners()
            .find_by_nic(nic)
            .await?
            .ok_or_else(|| DomainError::not_found("Owner", "nic", nic))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryStore;

    fn service() -> OwnerService {
        OwnerService::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn create_forces_active_status() {
        let svc = service();
        let mut owner = EvOwner::new("991234567V", "K. Perera");
        owner.status = ActiveStatus::Inactive;

        let created = svc.create(owner).await.unwrap();
        assert_eq!(created.status, ActiveStatus::Active);
    }

    #[tokio::test]
    async fn blank_nic_is_rejected() {
        let svc = service();
        let err = svc.create(EvOwner::new("   ", "No Key")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_nic_is_conflict() {
        let svc = service();
        svc.create(EvOwner::new("991234567V", "K. Perera")).await.unwrap();
        let err = svc
            .create(EvOwner::new("991234567V", "Other Person"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_mutable_fields_and_keeps_nic() {
        let svc = service();
        svc.create(EvOwner::new("991234567V", "K. Perera")).await.unwrap();

        svc.update(
            "991234567V",
            "Kasun Perera",
            Some("kasun@example.com".into()),
            None,
            Some("Nissan Leaf".into()),
            ActiveStatus::Inactive,
        )
        .await
        .unwrap();

        let stored = svc.get_by_nic("991234567V").await.unwrap().unwrap();
        assert_eq!(stored.name, "Kasun Perera");
        assert_eq!(stored.email.as_deref(), Some("kasun@example.com"));
        assert_eq!(stored.vehicle_details.as_deref(), Some("Nissan Leaf"));
        assert_eq!(stored.status, ActiveStatus::Inactive);
    }

    #[tokio::test]
    async fn activate_and_deactivate_toggle_status() {
        let svc = service();
        svc.create(EvOwner::new("991234567V", "K. Perera")).await.unwrap();

        svc.deactivate("991234567V").await.unwrap();
        assert_eq!(
            svc.get_by_nic("991234567V").await.unwrap().unwrap().status,
            ActiveStatus::Inactive
        );

        svc.activate("991234567V").await.unwrap();
        assert_eq!(
            svc.get_by_nic("991234567V").await.unwrap().unwrap().status,
            ActiveStatus::Active
        );
    }

    #[tokio::test]
    async fn operations_on_unknown_nic_are_not_found() {
        let svc = service();
        assert!(matches!(
            svc.deactivate("missing").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            svc.delete("missing").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
