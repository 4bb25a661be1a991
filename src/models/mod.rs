//! Database models and DTOs for the fleet catalogue.

pub mod car;
pub mod driver;
pub mod manufacturer;
pub mod pagination;
