//! HTTP handler definitions for the proxy server.
//!
//! Defines `AppState` (shared state carried through axum extractors) and
//! re-exports the handler functions used when building the router.

pub mod collect;
pub mod health;

pub use collect::custom_log_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};

use std::sync::Arc;
use std::time::Instant;

use collector_core::DataCollectorApi;

use super::{NetworkConfig, ShutdownController};

/// Shared application state passed to all axum handlers via `State`.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// The core proxy engine; one `post_custom_log` call per request.
    pub api: Arc<DataCollectorApi>,
    /// Graceful shutdown controller with health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Network configuration.
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}
