//! Core domain model and use-case services.
//!
//! Everything in here is infrastructure-free: services depend on the
//! driven ports in [`ports`], and inbound adapters depend on the driving
//! ports. Validation lives on the value types themselves so invalid data
//! cannot cross the boundary.

pub mod auth;
pub mod error;
pub mod field;
pub mod honour;
pub mod nomination;
pub mod ports;
pub mod review;
pub mod status;
pub mod tier;
pub mod user;

mod account_service;
mod honour_service;
mod nomination_service;

pub use account_service::AccountService;
pub use honour_service::HonourService;
pub use nomination_service::{FinalisePolicy, NominationService};

#[cfg(test)]
mod account_service_tests;
