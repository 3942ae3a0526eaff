//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Booking;

/// Booking API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub owner_nic: String,
    pub station_id: String,
    pub reservation_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            owner_nic: b.owner_nic,
            station_id: b.station_id,
            reservation_at: b.reservation_at,
            status: b.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 20))]
    pub owner_nic: String,
    #[validate(length(min = 1))]
    pub station_id: String,
    /// Reserved date/time (RFC 3339)
    pub reservation_at: DateTime<Utc>,
}

/// Update booking request; moves the booking to a station/time pair.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1))]
    pub station_id: String,
    pub reservation_at: DateTime<Utc>,
}
