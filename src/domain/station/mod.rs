//! Charging station aggregate

pub mod model;
pub mod repository;

pub use model::{ActiveStatus, ChargingStation, StationType};
pub use repository::StationRepository;
