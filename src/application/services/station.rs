//! Station registry
//!
//! CRUD plus the capacity-coupled lifecycle: a station with active
//! bookings cannot be deactivated.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::locks::StationLocks;
use crate::domain::{
    ActiveStatus, ChargingStation, DomainError, DomainResult, RepositoryProvider, StationType,
};

pub struct StationService {
    repos: Arc<dyn RepositoryProvider>,
    station_locks: Arc<StationLocks>,
}

impl StationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, station_locks: Arc<StationLocks>) -> Self {
        Self {
            repos,
            station_locks,
        }
    }

    /// Register a station. New stations are always active.
    pub async fn create(
        &self,
        location: &str,
        station_type: StationType,
        slots_available: u32,
        schedule: Vec<String>,
    ) -> DomainResult<ChargingStation> {
        let station = ChargingStation::new(
            Uuid::new_v4().to_string(),
            location,
            station_type,
            slots_available,
            schedule,
        );
        self.repos.stations().insert(station.clone()).await?;

        info!(station_id = %station.id, location, "Station created");
        Ok(station)
    }

    /// Full replace of location/type/slots/schedule. Status and id are
    /// untouched; this is not a merge-patch.
    pub async fn update(
        &self,
        id: &str,
        location: &str,
        station_type: StationType,
        slots_available: u32,
        schedule: Vec<String>,
    ) -> DomainResult<()> {
        let mut existing = self.get_existing(id).await?;
        existing.location = location.to_string();
        existing.station_type = station_type;
        existing.slots_available = slots_available;
        existing.schedule = schedule;
        self.repos.stations().update(existing).await?;

        info!(station_id = %id, "Station updated");
        Ok(())
    }

    /// Replace only the operating schedule.
    pub async fn update_schedule(&self, id: &str, schedule: Vec<String>) -> DomainResult<()> {
        let mut existing = self.get_existing(id).await?;
        existing.schedule = schedule;
        self.repos.stations().update(existing).await?;

        info!(station_id = %id, "Station schedule updated");
        Ok(())
    }

    /// Unconditionally set the station active.
    pub async fn activate(&self, id: &str) -> DomainResult<()> {
        let mut existing = self.get_existing(id).await?;
        existing.status = ActiveStatus::Active;
        self.repos.stations().update(existing).await?;

        info!(station_id = %id, "Station activated");
        Ok(())
    }

    /// Set the station inactive, unless it still holds active bookings.
    ///
    /// Runs under the station lock: between the active-booking count and
    /// the status write no booking create can commit for this station.
    pub async fn deactivate(&self, id: &str) -> DomainResult<()> {
        let lock = self.station_locks.for_station(id);
        let _guard = lock.lock().await;

        let mut existing = self.get_existing(id).await?;
        let active = self.repos.bookings().count_active_for_station(id).await?;
        if active > 0 {
            return Err(DomainError::Conflict(format!(
                "station {} has {} active booking(s)",
                id, active
            )));
        }
        existing.status = ActiveStatus::Inactive;
        self.repos.stations().update(existing).await?;

        info!(station_id = %id, "Station deactivated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.repos.stations().delete(id).await?;
        info!(station_id = %id, "Station deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>> {
        self.repos.stations().find_by_id(id).await
    }

    pub async fn get_all(&self) -> DomainResult<Vec<ChargingStation>> {
        self.repos.stations().find_all().await
    }

    async fn get_existing(&self, id: &str) -> DomainResult<ChargingStation> {
        self.repos
            .stations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Station", "id", id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::BookingService;
    use crate::infrastructure::InMemoryStore;
    use chrono::{Duration, Utc};

    fn services() -> (StationService, BookingService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let repos: Arc<dyn RepositoryProvider> = store.clone();
        let locks = Arc::new(StationLocks::new());
        (
            StationService::new(repos.clone(), locks.clone()),
            BookingService::new(repos, locks),
            store,
        )
    }

    #[tokio::test]
    async fn create_forces_active_status() {
        let (stations, _, _) = services();
        let station = stations
            .create("Galle Rd", StationType::Ac, 4, vec!["daily 06:00-22:00".into()])
            .await
            .unwrap();
        assert!(station.is_active());
    }

    #[tokio::test]
    async fn deactivate_with_active_booking_is_blocked_until_cancel() {
        let (stations, bookings, _) = services();
        let station = stations.create("Galle Rd", StationType::Ac, 4, vec![]).await.unwrap();

        let booking = bookings
            .create("991234567V", &station.id, Utc::now() + Duration::days(1))
            .await
            .unwrap();

        let err = stations.deactivate(&station.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        bookings.cancel(&booking.id).await.unwrap();
        stations.deactivate(&station.id).await.unwrap();

        let stored = stations.get_by_id(&station.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ActiveStatus::Inactive);
    }

    #[tokio::test]
    async fn activate_is_unconditional() {
        let (stations, _, _) = services();
        let station = stations.create("Galle Rd", StationType::Dc, 2, vec![]).await.unwrap();
        stations.deactivate(&station.id).await.unwrap();
        stations.activate(&station.id).await.unwrap();

        let stored = stations.get_by_id(&station.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ActiveStatus::Active);
    }

    #[tokio::test]
    async fn activate_unknown_station_is_not_found() {
        let (stations, _, _) = services();
        let err = stations.activate("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let (stations, _, _) = services();
        let station = stations
            .create("Galle Rd", StationType::Ac, 4, vec!["daily 06:00-22:00".into()])
            .await
            .unwrap();

        stations
            .update(&station.id, "Marine Dr", StationType::Dc, 6, vec![])
            .await
            .unwrap();

        let stored = stations.get_by_id(&station.id).await.unwrap().unwrap();
        assert_eq!(stored.location, "Marine Dr");
        assert_eq!(stored.station_type, StationType::Dc);
        assert_eq!(stored.slots_available, 6);
        assert!(stored.schedule.is_empty());
        assert_eq!(stored.status, ActiveStatus::Active);
    }

    #[tokio::test]
    async fn update_schedule_touches_only_schedule() {
        let (stations, _, _) = services();
        let station = stations.create("Galle Rd", StationType::Ac, 4, vec![]).await.unwrap();

        stations
            .update_schedule(&station.id, vec!["Sat-Sun 08:00-18:00".into()])
            .await
            .unwrap();

        let stored = stations.get_by_id(&station.id).await.unwrap().unwrap();
        assert_eq!(stored.schedule, vec!["Sat-Sun 08:00-18:00".to_string()]);
        assert_eq!(stored.location, "Galle Rd");
    }

    #[tokio::test]
    async fn delete_removes_station() {
        let (stations, _, _) = services();
        let station = stations.create("Galle Rd", StationType::Ac, 4, vec![]).await.unwrap();
        stations.delete(&station.id).await.unwrap();
        assert!(stations.get_by_id(&station.id).await.unwrap().is_none());
    }
}
