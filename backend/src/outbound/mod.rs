//! Outbound adapters: infrastructure implementations of the domain's driven
//! ports.

pub mod crypto;
pub mod persistence;
