//! Graceful shutdown with in-flight request tracking.
//!
//! Health state lives in a `watch` channel so probes read it cheaply and
//! the server loop can await the transition to `Draining`. In-flight proxy
//! requests are counted with an atomic and RAII guards, so the count stays
//! accurate even when a handler panics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Server health state: Starting -> Ready -> Draining -> Stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Initializing; not yet accepting requests.
    Starting,
    /// Fully operational.
    Ready,
    /// Shutdown signalled; in-flight requests are completing.
    Draining,
    /// All in-flight requests completed.
    Stopped,
}

impl HealthState {
    /// Lowercase name for health endpoint output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

/// Coordinates graceful shutdown across the server.
///
/// Probes read `health_state()`, handlers hold an [`InFlightGuard`] for the
/// duration of each proxy cycle, and the server loop calls
/// `trigger_shutdown()` followed by `wait_for_drain()`.
#[derive(Debug)]
pub struct ShutdownController {
    state: watch::Sender<HealthState>,
    in_flight: Arc<AtomicU64>,
}

impl ShutdownController {
    /// Creates a controller in the `Starting` state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(HealthState::Starting);
        Self {
            state,
            in_flight: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Transitions to `Ready`.
    pub fn set_ready(&self) {
        self.state.send_replace(HealthState::Ready);
    }

    /// Transitions to `Draining` and wakes all state watchers.
    pub fn trigger_shutdown(&self) {
        self.state.send_replace(HealthState::Draining);
    }

    /// Returns the current health state.
    #[must_use]
    pub fn health_state(&self) -> HealthState {
        *self.state.borrow()
    }

    /// Returns a receiver for observing state transitions.
    #[must_use]
    pub fn state_receiver(&self) -> watch::Receiver<HealthState> {
        self.state.subscribe()
    }

    /// Creates an RAII guard counting one in-flight request.
    #[must_use]
    pub fn in_flight_guard(&self) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Current number of in-flight requests.
    #[must_use]
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Waits for in-flight requests to finish, up to `timeout`.
    ///
    /// Returns `true` and transitions to `Stopped` when the count reaches
    /// zero; returns `false` (state stays `Draining`) on timeout.
    pub async fn wait_for_drain(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        while self.in_flight.load(Ordering::Relaxed) > 0 {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            // Poll rather than busy-wait; drains are rare and short.
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        self.state.send_replace(HealthState::Stopped);
        true
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that decrements the in-flight counter when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<AtomicU64>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
