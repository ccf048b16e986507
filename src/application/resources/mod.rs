//! Concrete resources: field tables, paths and defaults.

pub mod events;
pub mod gallery;
pub mod members;
pub mod registration;
