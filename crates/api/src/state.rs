use std::sync::Arc;

use crate::background::popularity::PopularitySink;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quotd_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Queue handle for asynchronous popularity counter updates.
    pub popularity: PopularitySink,
}
