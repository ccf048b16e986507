//! HTTP adapter for the club backend.

mod client;
mod decode;

pub use client::{ApiClient, Reply};
