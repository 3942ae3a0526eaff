//! Charging station store contract

use async_trait::async_trait;

use super::model::ChargingStation;
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Insert a new station. Fails with a conflict if the ID is taken.
    async fn insert(&self, station: ChargingStation) -> DomainResult<()>;

    /// Find station by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>>;

    /// Replace an existing station; version-checked (see BookingRepository).
    async fn update(&self, station: ChargingStation) -> DomainResult<()>;

    /// Delete a station by ID
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// All stations
    async fn find_all(&self) -> DomainResult<Vec<ChargingStation>>;

    /// Total number of stations
    async fn count(&self) -> DomainResult<u64>;
}
