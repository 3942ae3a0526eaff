//! Per-station lock registry
//!
//! Capacity-sensitive operations (admitting a booking, deactivating a
//! station) serialize on the station key. Deactivation's count-check and
//! status-write run under the same lock a booking-create must take, so
//! the pair is atomic with respect to new admissions.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

pub struct StationLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl StationLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Lock handle for one station. Locks are created on first use and
    /// kept for the life of the process; the per-station footprint is a
    /// single mutex.
    pub fn for_station(&self, station_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(station_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for StationLocks {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────
