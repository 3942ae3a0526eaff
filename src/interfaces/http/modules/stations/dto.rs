//! Charging station DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ChargingStation, DomainError, DomainResult, StationType};

/// Station API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct StationDto {
    pub id: String,
    pub location: String,
    /// "AC" or "DC"
    pub station_type: String,
    pub slots_available: u32,
    pub status: String,
    pub schedule: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ChargingStation> for StationDto {
    fn from(s: ChargingStation) -> Self {
        Self {
            id: s.id,
            location: s.location,
            station_type: s.station_type.as_str().to_string(),
            slots_available: s.slots_available,
            status: s.status.as_str().to_string(),
            schedule: s.schedule,
            created_at: s.created_at,
        }
    }
}

/// Create station request; new stations are always active.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// "AC" or "DC"
    pub station_type: String,
    pub slots_available: u32,
    #[serde(default)]
    pub schedule: Vec<String>,
}

/// Update station request; full replace of the mutable fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStationRequest {
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub station_type: String,
    pub slots_available: u32,
    #[serde(default)]
    pub schedule: Vec<String>,
}

/// Schedule-only update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleRequest {
    pub schedule: Vec<String>,
}

pub fn parse_station_type(s: &str) -> DomainResult<StationType> {
    StationType::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("unknown station type: {}", s)))
}
