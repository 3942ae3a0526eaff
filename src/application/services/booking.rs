//! Booking engine
//!
//! Validates and mutates bookings against the reservation window and
//! lead-time rules. Stations and owners are read-only collaborators.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::locks::StationLocks;
use crate::domain::{Booking, DomainError, DomainResult, RepositoryProvider};

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    station_locks: Arc<StationLocks>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, station_locks: Arc<StationLocks>) -> Self {
        Self {
            repos,
            station_locks,
        }
    }

    /// Create a booking on a station.
    ///
    /// The reservation must lie in the future, at most 7 days out, and
    /// the station must exist and be active. Runs under the station
    /// lock so it cannot interleave with a deactivation of the same
    /// station. No slot-overlap check is made.
    pub async fn create(
        &self,
        owner_nic: &str,
        station_id: &str,
        reservation_at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let now = Utc::now();
        if !Booking::within_reservation_window(reservation_at, now) {
            return Err(DomainError::Validation(
                "reservation must be in the future and within 7 days".to_string(),
            ));
        }

        let lock = self.station_locks.for_station(station_id);
        let _guard = lock.lock().await;

        let station = self
            .repos
            .stations()
            .find_by_id(station_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Station", "id", station_id))?;
        if !station.is_active() {
            return Err(DomainError::Conflict(format!(
                "station {} is not active",
                station_id
            )));
        }

        let booking = Booking::new(
            Uuid::new_v4().to_string(),
            owner_nic,
            station_id,
            reservation_at,
        );
        self.repos.bookings().insert(booking.clone()).await?;

        info!(booking_id = %booking.id, station_id, owner_nic, "Booking created");
        Ok(booking)
    }

    /// Move a booking to a new station and/or reservation time.
    ///
    /// Frozen once fewer than 12 hours remain before the existing
    /// reservation time; the new time must itself fit the 7-day window.
    pub async fn update(
        &self,
        id: &str,
        station_id: &str,
        reservation_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut existing = self
            .repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;

        let now = Utc::now();
        if !Booking::lead_time_remaining(existing.reservation_at, now) {
            return Err(DomainError::Conflict(
                "lead time violated: bookings are frozen within 12 hours of the reservation"
                    .to_string(),
            ));
        }
        if !existing.is_active() {
            return Err(DomainError::Conflict(format!(
                "booking {} is not active",
                id
            )));
        }
        if !Booking::within_reservation_window(reservation_at, now) {
            return Err(DomainError::Validation(
                "reservation must be in the future and within 7 days".to_string(),
            ));
        }

        // Moving an active booking admits it to the target station, so
        // the move takes that station's lock like a create does.
        let lock = self.station_locks.for_station(station_id);
        let _guard = lock.lock().await;

        existing.station_id = station_id.to_string();
        existing.reservation_at = reservation_at;
        self.repos.bookings().update(existing).await?;

        info!(booking_id = %id, station_id, "Booking updated");
        Ok(())
    }

    /// Cancel a booking. Terminal; a second cancel is rejected because
    /// the booking is no longer active.
    pub async fn cancel(&self, id: &str) -> DomainResult<()> {
        let mut existing = self
            .repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;

        let now = Utc::now();
        if !Booking::lead_time_remaining(existing.reservation_at, now) {
            return Err(DomainError::Conflict(
                "lead time violated: bookings are frozen within 12 hours of the reservation"
                    .to_string(),
            ));
        }
        if !existing.is_active() {
            return Err(DomainError::Conflict(format!(
                "booking {} is not active",
                id
            )));
        }

        existing.cancel();
        self.repos.bookings().update(existing).await?;

        info!(booking_id = %id, "Booking cancelled");
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        self.repos.bookings().find_by_id(id).await
    }

    pub async fn get_by_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_by_owner(owner_nic).await
    }

    pub async fn get_by_station(&self, station_id: &str) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_by_station(station_id).await
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActiveStatus, BookingStatus, ChargingStation, StationType};
    use crate::infrastructure::InMemoryStore;
    use chrono::Duration;

    fn service() -> (BookingService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let repos: Arc<dyn RepositoryProvider> = store.clone();
        let svc = BookingService::new(repos, Arc::new(StationLocks::new()));
        (svc, store)
    }

    async fn seed_station(store: &InMemoryStore, id: &str, status: ActiveStatus) {
        let mut station = ChargingStation::new(id, "Colombo 03", StationType::Ac, 4, vec![]);
        station.status = status;
        store.stations().insert(station).await.unwrap();
    }

    #[tokio::test]
    async fn create_within_window_succeeds() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Active);
        assert_eq!(booking.station_id, "st-1");
        assert!(store.bookings().find_by_id(&booking.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_in_the_past_is_rejected() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let err = svc
            .create("991234567V", "st-1", Utc::now() - Duration::minutes(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_beyond_horizon_is_rejected() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let err = svc
            .create("991234567V", "st-1", Utc::now() + Duration::days(8))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_on_unknown_station_is_not_found() {
        let (svc, _store) = service();
        let err = svc
            .create("991234567V", "missing", Utc::now() + Duration::hours(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_on_inactive_station_is_conflict() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Inactive).await;

        let err = svc
            .create("991234567V", "st-1", Utc::now() + Duration::hours(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_with_enough_lead_time_succeeds() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;
        seed_station(&store, "st-2", ActiveStatus::Active).await;

        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::days(2))
            .await
            .unwrap();

        let new_at = Utc::now() + Duration::days(3);
        svc.update(&booking.id, "st-2", new_at).await.unwrap();

        let stored = store.bookings().find_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.station_id, "st-2");
        assert_eq!(stored.reservation_at, new_at);
        assert_eq!(stored.status, BookingStatus::Active);
    }

    #[tokio::test]
    async fn update_inside_lead_time_is_conflict() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        // 11 hours out: inside the 12-hour freeze
        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::hours(11))
            .await
            .unwrap();

        let err = svc
            .update(&booking.id, "st-1", Utc::now() + Duration::days(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_unknown_booking_is_not_found() {
        let (svc, _store) = service();
        let err = svc
            .update("missing", "st-1", Utc::now() + Duration::days(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_to_time_beyond_horizon_is_rejected() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::days(2))
            .await
            .unwrap();

        let err = svc
            .update(&booking.id, "st-1", Utc::now() + Duration::days(9))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn cancel_sets_cancelled() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::days(1))
            .await
            .unwrap();
        svc.cancel(&booking.id).await.unwrap();

        let stored = store.bookings().find_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn second_cancel_is_rejected() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::days(1))
            .await
            .unwrap();
        svc.cancel(&booking.id).await.unwrap();

        let err = svc.cancel(&booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancel_inside_lead_time_is_conflict() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;

        let booking = svc
            .create("991234567V", "st-1", Utc::now() + Duration::hours(2))
            .await
            .unwrap();

        let err = svc.cancel(&booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn listings_filter_by_owner_and_station() {
        let (svc, store) = service();
        seed_station(&store, "st-1", ActiveStatus::Active).await;
        seed_station(&store, "st-2", ActiveStatus::Active).await;

        svc.create("991234567V", "st-1", Utc::now() + Duration::days(1)).await.unwrap();
        svc.create("991234567V", "st-2", Utc::now() + Duration::days(1)).await.unwrap();
        svc.create("887654321V", "st-1", Utc::now() + Duration::days(1)).await.unwrap();

        assert_eq!(svc.get_by_owner("991234567V").await.unwrap().len(), 2);
        assert_eq!(svc.get_by_station("st-1").await.unwrap().len(), 2);
        assert_eq!(svc.get_all().await.unwrap().len(), 3);
        assert!(svc.get_by_owner("nobody").await.unwrap().is_empty());
    }
}
