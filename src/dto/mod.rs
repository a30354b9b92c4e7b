//! DTOs returned by the customer API.

pub mod api;
pub mod customer;
