//! Typed admin client for the photography club backend.
//!
//! The `application` layer holds the paged list controller, the entity form
//! binder and the per-resource field schemas; `infra` talks HTTP to the REST
//! backend and installs logging.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
