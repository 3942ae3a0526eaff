//! HTTP endpoint modules, one per resource

pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod health;
pub mod owners;
pub mod stations;
pub mod users;
