//! Application layer: list and form state driven through resource gateways.

pub mod error;
pub mod fields;
pub mod form;
pub mod gateway;
pub mod list;
pub mod pagination;
pub mod resources;
pub mod screen;
