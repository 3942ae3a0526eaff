//! EV owner aggregate

pub mod model;
pub mod repository;

pub use model::EvOwner;
pub use repository::OwnerRepository;
