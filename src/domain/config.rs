//! Config - Relay Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, EXEC_PATH};

/// Main relay configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Control service endpoint
    pub endpoint: EndpointConfig,
    /// Request timeout in seconds (unset = no timeout)
    pub timeout_secs: Option<u64>,
    /// Logging options
    pub log: LogConfig,
}

impl RelayConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Control service endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Service host IP or name
    pub host: String,
    /// Service port
    pub port: u16,
    /// Exec path, including the leading slash
    pub path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: EXEC_PATH.to_string(),
        }
    }
}

impl EndpointConfig {
    /// Full request URL (e.g. "http://192.168.2.56:8045/RubiksService.svc/exec")
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
    /// Mirror logs to daily rolling files in the data directory
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}
