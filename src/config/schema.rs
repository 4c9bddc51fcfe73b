//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key in the `domains` table whose value is used when a resolved country has
/// no explicit mapping of its own.
pub const FALLBACK_DOMAIN_KEY: &str = "default";

/// Root configuration for the geo routing gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Geolocation database settings.
    pub geoip: GeoIpConfig,

    /// Country display name to canonical domain. Must contain a `default`
    /// entry used for countries without an explicit mapping.
    pub domains: HashMap<String, String>,

    /// When true, an `ip` query parameter takes precedence over the
    /// connection-observed client address.
    pub allow_ip_override: bool,

    /// Request paths exempt from domain enforcement (exact match).
    pub excluded_paths: Vec<String>,

    /// Redirect behavior for requests on the wrong domain.
    pub redirect: RedirectConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum in-flight requests; further requests queue (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Geolocation database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoIpConfig {
    /// Path to a MaxMind country database (MMDB format).
    pub db_path: String,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            db_path: "GeoLite2-Country.mmdb".to_string(),
        }
    }
}

/// Redirect behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// HTTP status for redirect responses. One of 301, 302, 307.
    pub status: u16,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { status: 302 }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: RouterConfig = toml::from_str(
            r#"
            [domains]
            Mexico = "golazzos.com.mx"
            default = "golazzos.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.redirect.status, 302);
        assert!(!config.allow_ip_override);
        assert_eq!(config.domains["Mexico"], "golazzos.com.mx");
        assert_eq!(config.domains[FALLBACK_DOMAIN_KEY], "golazzos.com");
    }

    #[test]
    fn full_config_parses() {
        let config: RouterConfig = toml::from_str(
            r#"
            allow_ip_override = true
            excluded_paths = ["/health", "/metrics"]

            [listener]
            bind_address = "127.0.0.1:9000"

            [geoip]
            db_path = "/var/lib/GeoIP/GeoLite2-Country.mmdb"

            [domains]
            default = "example.com"

            [redirect]
            status = 301

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(config.allow_ip_override);
        assert_eq!(config.excluded_paths, vec!["/health", "/metrics"]);
        assert_eq!(config.redirect.status, 301);
        assert_eq!(config.geoip.db_path, "/var/lib/GeoIP/GeoLite2-Country.mmdb");
        assert_eq!(config.observability.log_level, "debug");
    }
}
