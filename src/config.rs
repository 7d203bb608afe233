//! Configuration module for Pingboard.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Directory holding the JSON data files (default: "data")
    pub data_dir: String,
    /// Per-request probe timeout in seconds (default: 5)
    pub probe_timeout_secs: u64,
    /// Base URL of the IP metadata provider
    pub lookup_url: String,
    /// API key for the IP metadata provider, if any
    pub lookup_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            data_dir: "data".to_string(),
            probe_timeout_secs: 5,
            lookup_url: "https://api.ip2location.io".to_string(),
            lookup_key: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PINGBOARD_HTTP_PORT`: HTTP port (default: 8080)
    /// - `PINGBOARD_DATA_DIR`: JSON data directory (default: "data")
    /// - `PINGBOARD_PROBE_TIMEOUT_SECS`: probe timeout in seconds (default: 5)
    /// - `PINGBOARD_LOOKUP_URL`: IP metadata provider base URL
    /// - `PINGBOARD_LOOKUP_KEY`: IP metadata provider API key
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(port_str) = env::var("PINGBOARD_HTTP_PORT") {
            if let Ok(port) = port_str.parse() {
                cfg.http_port = port;
            }
        }

        if let Ok(data_dir) = env::var("PINGBOARD_DATA_DIR") {
            cfg.data_dir = data_dir;
        }

        if let Ok(timeout_str) = env::var("PINGBOARD_PROBE_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse() {
                cfg.probe_timeout_secs = timeout;
            }
        }

        if let Ok(lookup_url) = env::var("PINGBOARD_LOOKUP_URL") {
            cfg.lookup_url = lookup_url;
        }

        if let Ok(lookup_key) = env::var("PINGBOARD_LOOKUP_KEY") {
            cfg.lookup_key = Some(lookup_key);
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.data_dir, "data");
        assert_eq!(cfg.probe_timeout_secs, 5);
        assert_eq!(cfg.lookup_url, "https://api.ip2location.io");
        assert!(cfg.lookup_key.is_none());
    }
}
