//! Diesel models and externally loaded configuration.

#[cfg(feature = "server")]
pub mod config;
pub mod customer;
