/// Shared application state for the webserver
use crate::config::WebserverConfig;
use crate::executor::TradeExecutor;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    /// Trade executor (immutable broker client and order defaults)
    pub executor: Arc<TradeExecutor>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: WebserverConfig, executor: Arc<TradeExecutor>) -> Self {
        Self {
            config: Arc::new(config),
            executor,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Seconds since the server state was created
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
