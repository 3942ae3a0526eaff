//! Business logic and use cases

pub mod services;

pub use services::{BookingService, OwnerService, StationLocks, StationService, UserService};
