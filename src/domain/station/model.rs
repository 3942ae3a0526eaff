//! Charging station domain entity

use chrono::{DateTime, Utc};

/// Station current type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationType {
    Ac,
    Dc,
}

impl StationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Dc => "DC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AC" => Some(Self::Ac),
            "DC" => Some(Self::Dc),
            _ => None,
        }
    }
}

impl std::fmt::Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Active/inactive flag shared by stations and owners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charging station
#[derive(Debug, Clone)]
pub struct ChargingStation {
    /// Unique station ID
    pub id: String,
    /// Human-readable location
    pub location: String,
    /// AC or DC
    pub station_type: StationType,
    /// Number of charging slots
    pub slots_available: u32,
    /// Whether the station accepts bookings
    pub status: ActiveStatus,
    /// Ordered list of human-readable operating windows,
    /// e.g. "Mon-Fri 08:00-20:00"
    pub schedule: Vec<String>,
    /// When the station was registered
    pub created_at: DateTime<Utc>,
    /// Store revision, bumped on every replace
    pub version: u64,
}

impl ChargingStation {
    /// New stations always start out active.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        station_type: StationType,
        slots_available: u32,
        schedule: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            station_type,
            slots_available,
            status: ActiveStatus::Active,
            schedule,
            created_at: Utc::now(),
            version: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ActiveStatus::Active
    }
}

// ── Tests ──────────────────────────────────────────────────────
