//! HTTP exposure of the catalog
//!
//! This module provides:
//! - `build_router`: the REST routes over an [`AppState`]
//! - `ServerBuilder`: wires config, store and service together and serves
//!   with graceful shutdown

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, ListParams};
pub use router::build_router;
