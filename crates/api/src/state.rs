use std::sync::Arc;

use intake_core::clock::Clock;
use intake_media::MediaStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: intake_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Time source for defaults, `updated_at` and the deadline rule.
    pub clock: Arc<dyn Clock>,
    /// Application event bus; every event becomes an application log row.
    pub event_bus: Arc<intake_events::EventBus>,
    /// Where attachment files are stored.
    pub media: Arc<dyn MediaStorage>,
}

impl AppState {
    /// Publish an application event stamped with the state's clock.
    pub fn log_event(&self, event: intake_events::AppEvent) {
        self.event_bus.publish(event.at(self.clock.now()));
    }
}
