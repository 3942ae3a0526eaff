//! # EV Charging Booking Service
//!
//! Reservation service for a small EV-charging operator: staff users,
//! EV owners keyed by NIC, charging stations, and the bookings linking
//! owners to stations.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, rules, store contracts, and the
//!   access-policy table
//! - **application**: Booking engine and registries
//! - **infrastructure**: In-memory document store and crypto (bcrypt, JWT)
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Graceful-shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the API router for easy access
pub use interfaces::http::{create_api_router, AppState};
