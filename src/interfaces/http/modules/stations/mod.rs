//! Charging station endpoints

pub mod dto;
pub mod handlers;

pub use handlers::StationsState;
