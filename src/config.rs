use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Bind address (0.0.0.0 for LAN, 127.0.0.1 for localhost)
    pub bind_addr: String,
    /// Voltage CSV re-read on every dashboard request
    pub data_path: PathBuf,
    /// Append-only acceleration event log
    pub accel_log_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env::var("VOLTBOARD_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            bind_addr: env::var("VOLTBOARD_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            data_path: env::var("VOLTBOARD_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/sample_data.csv")),
            accel_log_path: env::var("VOLTBOARD_ACCEL_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/acceleration_log.csv")),
        })
    }

    /// Get the full bind address (addr:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
