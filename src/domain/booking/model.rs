//! Booking domain entity

use chrono::{DateTime, Duration, Utc};

/// How far into the future a reservation may be placed.
pub const RESERVATION_HORIZON_DAYS: i64 = 7;

/// Minimum remaining interval before the reservation time during which a
/// booking may still be modified or cancelled.
pub const MIN_LEAD_TIME_HOURS: i64 = 12;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Booking holds a slot; counts against station deactivation
    Active,
    /// Cancelled by the owner or an operator
    Cancelled,
    /// Charging session took place
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Cancelled" => Some(Self::Cancelled),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charging-slot booking linking an EV owner to a station
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: String,
    /// NIC of the EV owner holding the booking
    pub owner_nic: String,
    /// Station the slot is reserved on
    pub station_id: String,
    /// Reserved date/time
    pub reservation_at: DateTime<Utc>,
    /// Current status
    pub status: BookingStatus,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
    /// Store revision, bumped on every replace
    pub version: u64,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        owner_nic: impl Into<String>,
        station_id: impl Into<String>,
        reservation_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_nic: owner_nic.into(),
            station_id: station_id.into(),
            reservation_at,
            status: BookingStatus::Active,
            created_at: Utc::now(),
            version: 0,
        }
    }

    /// Cancel this booking. Terminal.
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// Mark the charging session as done. Terminal.
    pub fn complete(&mut self) {
        self.status = BookingStatus::Completed;
    }

    /// Whether this booking still holds a slot.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// A new reservation must lie in the future, at most
    /// [`RESERVATION_HORIZON_DAYS`] ahead of `now`.
    pub fn within_reservation_window(reservation_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        reservation_at >= now && reservation_at <= now + Duration::days(RESERVATION_HORIZON_DAYS)
    }

    /// Whether at least [`MIN_LEAD_TIME_HOURS`] remain before
    /// `reservation_at`. Below that the booking is frozen.
    pub fn lead_time_remaining(reservation_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        reservation_at - now >= Duration::hours(MIN_LEAD_TIME_HOURS)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        Booking::new("b-1", "991234567V", "st-1", Utc::now() + Duration::days(2))
    }

    #[test]
    fn new_booking_is_active() {
        let b = sample_booking();
        assert!(b.is_active());
        assert_eq!(b.status, BookingStatus::Active);
        assert_eq!(b.version, 0);
    }

    #[test]
    fn cancel_sets_cancelled() {
        let mut b = sample_booking();
        b.cancel();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(!b.is_active());
    }

    #[test]
    fn complete_sets_completed() {
        let mut b = sample_booking();
        b.complete();
        assert_eq!(b.status, BookingStatus::Completed);
        assert!(!b.is_active());
    }

    #[test]
    fn window_rejects_past_times() {
        let now = Utc::now();
        assert!(!Booking::within_reservation_window(
            now - Duration::minutes(1),
            now
        ));
    }

    #[test]
    fn window_rejects_beyond_horizon() {
        let now = Utc::now();
        assert!(!Booking::within_reservation_window(
            now + Duration::days(RESERVATION_HORIZON_DAYS) + Duration::minutes(1),
            now
        ));
    }

    #[test]
    fn window_accepts_boundary() {
        let now = Utc::now();
        assert!(Booking::within_reservation_window(now, now));
        assert!(Booking::within_reservation_window(
            now + Duration::days(RESERVATION_HORIZON_DAYS),
            now
        ));
    }

    #[test]
    fn lead_time_boundary_is_twelve_hours() {
        let now = Utc::now();
        assert!(Booking::lead_time_remaining(
            now + Duration::hours(MIN_LEAD_TIME_HOURS),
            now
        ));
        assert!(!Booking::lead_time_remaining(
            now + Duration::hours(MIN_LEAD_TIME_HOURS) - Duration::minutes(1),
            now
        ));
    }

    #[test]
    fn eleven_hours_before_is_frozen() {
        // now+6d23h reservation, checked at now+6d12h: 11h remain
        let created = Utc::now();
        let reservation_at = created + Duration::days(6) + Duration::hours(23);
        let check_at = created + Duration::days(6) + Duration::hours(12);
        assert!(!Booking::lead_time_remaining(reservation_at, check_at));
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in &[
            BookingStatus::Active,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(BookingStatus::parse("Unknown"), None);
    }
}
