//! Domain layer types and invariants.

pub mod session;
pub mod types;
