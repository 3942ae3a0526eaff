//! Health endpoints

pub mod handlers;
