//! Dashboard endpoints

pub mod handlers;

pub use handlers::DashboardState;
