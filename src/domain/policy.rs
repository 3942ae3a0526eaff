//! Access policy
//!
//! Single declarative (role × operation) table consulted at the HTTP
//! boundary before any service call. A denied call never reaches the
//! services, so it can have no side effects.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::user::UserRole;

/// Every guarded operation the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // Bookings
    ListBookings,
    ReadBooking,
    ListBookingsByOwner,
    ListBookingsByStation,
    CreateBooking,
    UpdateBooking,
    CancelBooking,
    // Stations
    ListStations,
    ReadStation,
    CreateStation,
    UpdateStation,
    UpdateStationSchedule,
    DeleteStation,
    ActivateStation,
    DeactivateStation,
    // Owners
    ListOwners,
    ReadOwner,
    CreateOwner,
    UpdateOwner,
    DeleteOwner,
    ActivateOwner,
    DeactivateOwner,
    // Users
    ListUsers,
    ReadUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    // Dashboard
    ViewDashboard,
}

/// Outcome of a policy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

/// Who is making the call. `None` is an unauthenticated caller.
pub type Caller = Option<UserRole>;

/// The permission table. Pure; the sole source of authorization truth.
pub fn decide(caller: Caller, operation: Operation) -> Decision {
    use Operation::*;
    use UserRole::*;

    let permitted = match operation {
        // Booking reads and the create/cancel pair are open to the
        // public booking kiosks, which carry no credentials.
        ListBookings | ReadBooking | ListBookingsByStation | CreateBooking | CancelBooking => true,

        // Rescheduling goes through staff.
        UpdateBooking => matches!(caller, Some(Backoffice) | Some(StationOperator)),

        // Per-owner history needs a signed-in staff member.
        ListBookingsByOwner => caller.is_some(),

        // Station catalogue is staff-only; removal is back office alone.
        ListStations | ReadStation | CreateStation | UpdateStation | UpdateStationSchedule
        | ActivateStation | DeactivateStation => {
            matches!(caller, Some(Backoffice) | Some(StationOperator))
        }
        DeleteStation => matches!(caller, Some(Backoffice)),

        // Owner records are staff-only.
        ListOwners | ReadOwner | CreateOwner | UpdateOwner | DeleteOwner | ActivateOwner
        | DeactivateOwner => matches!(caller, Some(Backoffice) | Some(StationOperator)),

        // Any signed-in staff member.
        ListUsers | ReadUser | CreateUser | UpdateUser | DeleteUser | ViewDashboard => {
            caller.is_some()
        }
    };

    if permitted {
        Decision::Permit
    } else {
        Decision::Deny
    }
}

/// Boundary helper: deny anonymous callers with Unauthorized and
/// under-privileged roles with Forbidden.
pub fn authorize(caller: Caller, operation: Operation) -> DomainResult<()> {
    match decide(caller, operation) {
        Decision::Permit => Ok(()),
        Decision::Deny => match caller {
            None => Err(DomainError::Unauthorized(
                "authentication required".to_string(),
            )),
            Some(role) => Err(DomainError::Forbidden(format!(
                "role {} may not perform this operation",
                role
            ))),
        },
    }
}

// ── Tests ──────────────────────────────────────────────────────
