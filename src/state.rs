use std::time::Instant;

use tera::Tera;

use crate::config::ServerConfig;
use crate::render::page;
use crate::storage::AccelerationLog;

/// Main server state shared across all handlers
pub struct ServerState {
    pub config: ServerConfig,
    pub templates: Tera,
    pub accel_log: AccelerationLog,
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Result<Self, tera::Error> {
        let templates = page::templates()?;
        let accel_log = AccelerationLog::new(config.accel_log_path.clone());
        Ok(Self {
            config,
            templates,
            accel_log,
            start_time: Instant::now(),
        })
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
