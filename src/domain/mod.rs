//! Core business entities, rules, and store contracts

pub mod booking;
pub mod error;
pub mod owner;
pub mod policy;
pub mod repositories;
pub mod station;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingRepository, BookingStatus};
pub use error::{DomainError, DomainResult};
pub use owner::{EvOwner, OwnerRepository};
pub use policy::{authorize, decide, Decision, Operation};
pub use repositories::RepositoryProvider;
pub use station::{ActiveStatus, ChargingStation, StationRepository, StationType};
pub use user::{User, UserRepository, UserRole};
