//! HTTP endpoint configuration.
//!
//! Provides [`HttpEndpointConfig`] for the twinstack HTTP endpoint. Values are
//! loaded from environment variables and fall back to sensible defaults.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::pattern::ApiGeneration;
use crate::router::RouteConfig;

/// HTTP endpoint configuration.
///
/// # Examples
///
/// ```
/// use twinstack_http::config::HttpEndpointConfig;
///
/// let config = HttpEndpointConfig::default();
/// assert_eq!(config.listen, "0.0.0.0:8080");
/// assert!(config.path_prefix.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct HttpEndpointConfig {
    /// Bind address (e.g. `"0.0.0.0:8080"`).
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Path prefix stripped before mapping (e.g. `"/api/v3.0"`).
    #[builder(default)]
    pub path_prefix: String,

    /// `"v3"` or `"v1"`, selecting the submodel prefix layout.
    #[builder(default = String::from("v3"))]
    pub api_generation: String,

    /// Default `limit` applied to paged routes without one of their own.
    #[builder(default)]
    pub default_page_limit: Option<u32>,
}

impl Default for HttpEndpointConfig {
    fn default() -> Self {
        Self {
            listen: String::from("0.0.0.0:8080"),
            log_level: String::from("info"),
            path_prefix: String::new(),
            api_generation: String::from("v3"),
            default_page_limit: None,
        }
    }
}

impl HttpEndpointConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `HTTP_LISTEN` | `0.0.0.0:8080` |
    /// | `LOG_LEVEL` | `info` |
    /// | `PATH_PREFIX` | *(empty)* |
    /// | `API_GENERATION` | `v3` |
    /// | `DEFAULT_PAGE_LIMIT` | *(unset)* |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("HTTP_LISTEN") {
            config.listen = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("PATH_PREFIX") {
            config.path_prefix = v;
        }
        if let Ok(v) = std::env::var("API_GENERATION") {
            config.api_generation = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_PAGE_LIMIT") {
            if let Ok(n) = v.trim().parse::<u32>() {
                config.default_page_limit = Some(n);
            }
        }

        config
    }

    /// The mapping-relevant subset of this configuration.
    ///
    /// An unrecognized generation falls back to v3 and a zero page limit is
    /// treated as unset.
    #[must_use]
    pub fn route_config(&self) -> RouteConfig {
        let api_generation = self.api_generation.parse().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to API generation v3");
            ApiGeneration::V3
        });
        RouteConfig {
            api_generation,
            default_page_limit: self.default_page_limit.and_then(NonZeroU32::new),
        }
    }
}
