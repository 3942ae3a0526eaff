//! Repository provider
//!
//! One handle bundling the per-entity store contracts, so services and
//! handlers depend on a single `Arc<dyn RepositoryProvider>`.

use crate::domain::booking::BookingRepository;
use crate::domain::owner::OwnerRepository;
use crate::domain::station::StationRepository;
use crate::domain::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;
    fn stations(&self) -> &dyn StationRepository;
    fn owners(&self) -> &dyn OwnerRepository;
    fn users(&self) -> &dyn UserRepository;
}
