use std::sync::Arc;

use tripsync_events::{EventBus, ResultNotifier};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: tripsync_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publishes platform events for audit persistence.
    pub event_bus: Arc<EventBus>,
    /// Fire-and-forget notification fan-out.
    pub notifier: Arc<ResultNotifier>,
}
