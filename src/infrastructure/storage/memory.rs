//! In-memory document store
//!
//! DashMap-backed maps, one per entity type. Every replace is
//! version-checked: the write succeeds only when the caller's `version`
//! matches the stored revision, which is then bumped. A mismatch means
//! another writer committed in between; the caller gets a Conflict and
//! re-reads. `get_mut` holds the shard lock for the whole
//! compare-and-replace, so the check and the write cannot interleave.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    Booking, BookingRepository, BookingStatus, ChargingStation, DomainError, DomainResult,
    EvOwner, OwnerRepository, RepositoryProvider, StationRepository, User, UserRepository,
};

pub struct InMemoryStore {
    bookings: DashMap<String, Booking>,
    stations: DashMap<String, ChargingStation>,
    owners: DashMap<String, EvOwner>,
    users: DashMap<String, User>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
            stations: DashMap::new(),
            owners: DashMap::new(),
            users: DashMap::new(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn stations(&self) -> &dyn StationRepository {
        self
    }

    fn owners(&self) -> &dyn OwnerRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(&self, booking: Booking) -> DomainResult<()> {
        match self.bookings.entry(booking.id.clone()) {
            dashmap::Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "booking {} already exists",
                booking.id
            ))),
            dashmap::Entry::Vacant(slot) => {
                slot.insert(booking);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn update(&self, mut booking: Booking) -> DomainResult<()> {
        let mut stored = self
            .bookings
            .get_mut(&booking.id)
            .ok_or_else(|| DomainError::not_found("Booking", "id", &booking.id))?;
        if stored.version != booking.version {
            return Err(DomainError::Conflict(format!(
                "booking {} was modified concurrently",
                booking.id
            )));
        }
        booking.version += 1;
        *stored = booking;
        Ok(())
    }

    async fn find_by_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.owner_nic == owner_nic)
            .map(|b| b.clone())
            .collect())
    }

    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.station_id == station_id)
            .map(|b| b.clone())
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        Ok(self.bookings.iter().map(|b| b.clone()).collect())
    }

    async fn count_active_for_station(&self, station_id: &str) -> DomainResult<u64> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.station_id == station_id && b.status == BookingStatus::Active)
            .count() as u64)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.bookings.len() as u64)
    }
}

#[async_trait]
impl StationRepository for InMemoryStore {
    async fn insert(&self, station: ChargingStation) -> DomainResult<()> {
        match self.stations.entry(station.id.clone()) {
            dashmap::Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "station {} already exists",
                station.id
            ))),
            dashmap::Entry::Vacant(slot) => {
                slot.insert(station);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>> {
        Ok(self.stations.get(id).map(|s| s.clone()))
    }

    async fn update(&self, mut station: ChargingStation) -> DomainResult<()> {
        let mut stored = self
            .stations
            .get_mut(&station.id)
            .ok_or_else(|| DomainError::not_found("Station", "id", &station.id))?;
        if stored.version != station.version {
            return Err(DomainError::Conflict(format!(
                "station {} was modified concurrently",
                station.id
            )));
        }
        station.version += 1;
        *stored = station;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.stations
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Station", "id", id))?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<ChargingStation>> {
        Ok(self.stations.iter().map(|s| s.clone()).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.stations.len() as u64)
    }
}

#[async_trait]
impl OwnerRepository for InMemoryStore {
    async fn insert(&self, owner: EvOwner) -> DomainResult<()> {
        // The NIC is the map key; the entry API makes the uniqueness
        // check and the insert one atomic step.
        match self.owners.entry(owner.nic.clone()) {
            dashmap::Entry::Occupied(_) => {
                Err(DomainError::Conflict(format!("NIC {} already exists", owner.nic)))
            }
            dashmap::Entry::Vacant(slot) => {
                slot.insert(owner);
                Ok(())
            }
        }
    }

    async fn find_by_nic(&self, nic: &str) -> DomainResult<Option<EvOwner>> {
        Ok(self.owners.get(nic).map(|o| o.clone()))
    }

    async fn update(&self, mut owner: EvOwner) -> DomainResult<()> {
        let mut stored = self
            .owners
            .get_mut(&owner.nic)
            .ok_or_else(|| DomainError::not_found("Owner", "nic", &owner.nic))?;
        if stored.version != owner.version {
            return Err(DomainError::Conflict(format!(
                "owner {} was modified concurrently",
                owner.nic
            )));
        }
        owner.version += 1;
        *stored = owner;
        Ok(())
    }

    async fn delete(&self, nic: &str) -> DomainResult<()> {
        self.owners
            .remove(nic)
            .ok_or_else(|| DomainError::not_found("Owner", "nic", nic))?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<EvOwner>> {
        Ok(self.owners.iter().map(|o| o.clone()).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.owners.len() as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: User) -> DomainResult<()> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!(
                "email {} already in use",
                user.email
            )));
        }
        match self.users.entry(user.id.clone()) {
            dashmap::Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "user {} already exists",
                user.id
            ))),
            dashmap::Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn update(&self, mut user: User) -> DomainResult<()> {
        let mut stored = self
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("User", "id", &user.id))?;
        if stored.version != user.version {
            return Err(DomainError::Conflict(format!(
                "user {} was modified concurrently",
                user.id
            )));
        }
        user.version += 1;
        *stored = user;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.users
            .remove(id)
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.users.iter().map(|u| u.clone()).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationType, UserRole};
    use chrono::{Duration, Utc};

    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn sample_booking(id: &str, station_id: &str) -> Booking {
        Booking::new(id, "991234567V", station_id, Utc::now() + Duration::days(1))
    }

    #[tokio::test]
    async fn stale_version_update_is_rejected() {
        let s = store();
        BookingRepository::insert(&s, sample_booking("b-1", "st-1"))
            .await
            .unwrap();

        // Two readers pick up version 0
        let mut first = BookingRepository::find_by_id(&s, "b-1").await.unwrap().unwrap();
        let mut second = BookingRepository::find_by_id(&s, "b-1").await.unwrap().unwrap();

        first.cancel();
        BookingRepository::update(&s, first).await.unwrap();

        // The slower writer loses and must re-read
        second.station_id = "st-2".to_string();
        let err = BookingRepository::update(&s, second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // The first write survived
        let stored = BookingRepository::find_by_id(&s, "b-1").await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn duplicate_nic_insert_is_rejected() {
        let s = store();
        s.owners().insert(EvOwner::new("991234567V", "K. Perera")).await.unwrap();
        let err = s
            .owners()
            .insert(EvOwner::new("991234567V", "Someone Else"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Case differs, key differs
        s.owners().insert(EvOwner::new("991234567v", "K. Perera")).await.unwrap();
        assert_eq!(s.owners().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn active_count_ignores_cancelled_and_other_stations() {
        let s = store();
        BookingRepository::insert(&s, sample_booking("b-1", "st-1")).await.unwrap();
        BookingRepository::insert(&s, sample_booking("b-2", "st-1")).await.unwrap();
        BookingRepository::insert(&s, sample_booking("b-3", "st-2")).await.unwrap();

        let mut b = BookingRepository::find_by_id(&s, "b-2").await.unwrap().unwrap();
        b.cancel();
        BookingRepository::update(&s, b).await.unwrap();

        assert_eq!(s.bookings().count_active_for_station("st-1").await.unwrap(), 1);
        assert_eq!(s.bookings().count_active_for_station("st-2").await.unwrap(), 1);
        assert_eq!(s.bookings().count_active_for_station("st-3").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_insert_is_rejected() {
        let s = store();
        s.users()
            .insert(User::new("u-1", "ops@evcharge.lk", "h1", "Ops", UserRole::Backoffice))
            .await
            .unwrap();
        let err = s
            .users()
            .insert(User::new("u-2", "ops@evcharge.lk", "h2", "Other", UserRole::StationOperator))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn station_delete_unknown_is_not_found() {
        let s = store();
        let err = s.stations().delete("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn station_roundtrip() {
        let s = store();
        let station = ChargingStation::new("st-1", "Kandy", StationType::Dc, 2, vec![]);
        s.stations().insert(station).await.unwrap();
        let found = s.stations().find_by_id("st-1").await.unwrap().unwrap();
        assert_eq!(found.location, "Kandy");
        assert_eq!(s.stations().count().await.unwrap(), 1);
    }
}
