//! quotd API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! popularity sink) so integration tests and the binary entrypoint can both
//! access them.

pub mod background;
pub mod config;
pub mod error;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
