//! Service configuration
//!
//! Read from environment variables; invalid values fall back to the defaults
//! in `utils/constants.rs` with a warning.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_MAX_BATCH, DEFAULT_PORT, DEFAULT_RATE_LIMIT_PER_MINUTE,
    DEFAULT_TELEMETRY_DIR,
};

/// Configuration for the API server and the line-oriented CLI
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Maximum items per batch request
    pub max_batch_size: usize,
    /// Requests allowed per client per window
    pub rate_limit_per_window: u32,
    pub rate_limit_window: Duration,
    /// Where telemetry snapshots are written
    pub telemetry_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_batch_size: DEFAULT_MAX_BATCH,
            rate_limit_per_window: DEFAULT_RATE_LIMIT_PER_MINUTE,
            rate_limit_window: Duration::from_secs(60),
            telemetry_dir: PathBuf::from(DEFAULT_TELEMETRY_DIR),
        }
    }
}

impl ServiceConfig {
    /// Build from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // PORT is set by container platforms, TXRISK_PORT for local runs
        let port = lookup("PORT")
            .map(|v| ("PORT", v))
            .or_else(|| lookup("TXRISK_PORT").map(|v| ("TXRISK_PORT", v)))
            .map(|(key, v)| parse_or(key, &v, defaults.port))
            .unwrap_or(defaults.port);

        let max_batch_size = lookup("TXRISK_MAX_BATCH")
            .map(|v| parse_or("TXRISK_MAX_BATCH", &v, defaults.max_batch_size))
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_batch_size);

        let rate_limit_per_window = lookup("TXRISK_RATE_LIMIT")
            .map(|v| parse_or("TXRISK_RATE_LIMIT", &v, defaults.rate_limit_per_window))
            .unwrap_or(defaults.rate_limit_per_window);

        Self {
            host: lookup("TXRISK_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port,
            max_batch_size,
            rate_limit_per_window,
            rate_limit_window: defaults.rate_limit_window,
            telemetry_dir: lookup("TXRISK_TELEMETRY_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.telemetry_dir),
        }
    }

    /// Bind address of the API server
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e| AppError::with_source(super::errors::ErrorCode::ConfigInvalidValue, raw.clone(), e))
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: &str, default: T) -> T {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = raw, "{}", AppError::invalid_config(key, raw));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.socket_addr().unwrap().port(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_precedence() {
        let config = ServiceConfig::from_lookup(lookup_from(&[("PORT", "9000"), ("TXRISK_PORT", "9100")]));
        assert_eq!(config.port, 9000);
        let config = ServiceConfig::from_lookup(lookup_from(&[("TXRISK_PORT", "9100")]));
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("TXRISK_PORT", "not-a-port"),
            ("TXRISK_MAX_BATCH", "0"),
            ("TXRISK_RATE_LIMIT", "-3"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_batch_size, DEFAULT_MAX_BATCH);
        assert_eq!(config.rate_limit_per_window, DEFAULT_RATE_LIMIT_PER_MINUTE);
    }

    #[test]
    fn test_bad_host_is_config_error() {
        let config = ServiceConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
