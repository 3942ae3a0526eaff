//! Booking aggregate
//!
//! Contains the Booking entity, lifecycle rules, and store contract.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingStatus, MIN_LEAD_TIME_HOURS, RESERVATION_HORIZON_DAYS};
pub use repository::BookingRepository;
