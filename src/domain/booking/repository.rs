//! Booking store contract

use async_trait::async_trait;

use super::model::Booking;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    async fn insert(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Replace an existing booking. The write only succeeds when
    /// `booking.version` matches the stored revision; the stored
    /// revision is bumped on success.
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// All bookings held by an owner
    async fn find_by_owner(&self, owner_nic: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings on a station, any status
    async fn find_by_station(&self, station_id: &str) -> DomainResult<Vec<Booking>>;

    /// All bookings, any status
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Number of bookings on a station with status Active.
    /// Drives the station-deactivation guard.
    async fn count_active_for_station(&self, station_id: &str) -> DomainResult<u64>;

    /// Total number of bookings
    async fn count(&self) -> DomainResult<u64>;
}
