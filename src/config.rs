// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Observer configuration
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NETCRUMB_NOTIFY_ENDPOINT` | `https://notify.bugsnag.com` | Error ingestion endpoint |
//! | `NETCRUMB_SESSIONS_ENDPOINT` | `https://sessions.bugsnag.com` | Session ingestion endpoint |
//! | `NETCRUMB_IGNORED_URLS` | (none) | Comma-separated URLs that never produce breadcrumbs |
//! | `NETCRUMB_ENABLED_TYPES` | (all) | Comma-separated breadcrumb types; empty disables all |
//! | `NETCRUMB_MAX_BREADCRUMBS` | 25 | Breadcrumbs retained by [`BreadcrumbLog`](crate::BreadcrumbLog) |

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::breadcrumb::BreadcrumbType;
use crate::error::{Error, Result};

/// Default error ingestion endpoint
pub const DEFAULT_NOTIFY_ENDPOINT: &str = "https://notify.bugsnag.com";

/// Default session ingestion endpoint
pub const DEFAULT_SESSIONS_ENDPOINT: &str = "https://sessions.bugsnag.com";

/// Default number of retained breadcrumbs
pub const DEFAULT_MAX_BREADCRUMBS: usize = 25;

const ENV_NOTIFY_ENDPOINT: &str = "NETCRUMB_NOTIFY_ENDPOINT";
const ENV_SESSIONS_ENDPOINT: &str = "NETCRUMB_SESSIONS_ENDPOINT";
const ENV_IGNORED_URLS: &str = "NETCRUMB_IGNORED_URLS";
const ENV_ENABLED_TYPES: &str = "NETCRUMB_ENABLED_TYPES";
const ENV_MAX_BREADCRUMBS: &str = "NETCRUMB_MAX_BREADCRUMBS";

/// Reserved ingestion endpoints of the monitoring backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Error report endpoint
    pub notify: String,
    /// Session tracking endpoint
    pub sessions: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            notify: DEFAULT_NOTIFY_ENDPOINT.to_string(),
            sessions: DEFAULT_SESSIONS_ENDPOINT.to_string(),
        }
    }
}

/// Network breadcrumbs configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkBreadcrumbsConfig {
    /// Reserved endpoints that never produce breadcrumbs
    pub endpoints: Endpoints,
    /// URLs (query string excluded) that never produce breadcrumbs
    pub ignored_urls: Vec<String>,
    /// Enabled breadcrumb types. `None` enables all, an empty list none.
    pub enabled_breadcrumb_types: Option<Vec<BreadcrumbType>>,
    /// Maximum breadcrumbs kept by the in-memory log
    pub max_breadcrumbs: usize,
}

impl Default for NetworkBreadcrumbsConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            ignored_urls: Vec::new(),
            enabled_breadcrumb_types: None,
            max_breadcrumbs: DEFAULT_MAX_BREADCRUMBS,
        }
    }
}

impl NetworkBreadcrumbsConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reserved endpoints
    pub fn endpoints(mut self, notify: impl Into<String>, sessions: impl Into<String>) -> Self {
        self.endpoints = Endpoints {
            notify: notify.into(),
            sessions: sessions.into(),
        };
        self
    }

    /// Add an ignored URL
    pub fn ignore_url(mut self, url: impl Into<String>) -> Self {
        self.ignored_urls.push(url.into());
        self
    }

    /// Replace the ignored URLs
    pub fn ignored_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Set the enabled breadcrumb types
    pub fn enabled_breadcrumb_types(mut self, types: Option<Vec<BreadcrumbType>>) -> Self {
        self.enabled_breadcrumb_types = types;
        self
    }

    /// Set the maximum retained breadcrumbs
    pub fn max_breadcrumbs(mut self, max: usize) -> Self {
        self.max_breadcrumbs = max;
        self
    }

    /// Check whether a breadcrumb type passes the enabled-types policy
    pub fn is_type_enabled(&self, kind: BreadcrumbType) -> bool {
        match self.enabled_breadcrumb_types {
            Some(ref types) => types.contains(&kind),
            None => true,
        }
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build a config from `NETCRUMB_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(notify) = env::var(ENV_NOTIFY_ENDPOINT) {
            config.endpoints.notify = notify;
        }
        if let Ok(sessions) = env::var(ENV_SESSIONS_ENDPOINT) {
            config.endpoints.sessions = sessions;
        }

        if let Ok(val) = env::var(ENV_IGNORED_URLS) {
            config.ignored_urls = split_list(&val);
        }

        // Empty string means "no types enabled", unset means all
        if let Ok(val) = env::var(ENV_ENABLED_TYPES) {
            let types = split_list(&val)
                .iter()
                .map(|s| {
                    s.parse::<BreadcrumbType>()
                        .map_err(|e| Error::config(ENV_ENABLED_TYPES, e.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;
            config.enabled_breadcrumb_types = Some(types);
        }

        if let Ok(val) = env::var(ENV_MAX_BREADCRUMBS) {
            config.max_breadcrumbs = val.trim().parse::<usize>().map_err(|_| {
                Error::config(
                    ENV_MAX_BREADCRUMBS,
                    format!("expected non-negative integer, got '{}'", val),
                )
            })?;
        }

        Ok(config)
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetworkBreadcrumbsConfig::default();
        assert_eq!(config.endpoints.notify, DEFAULT_NOTIFY_ENDPOINT);
        assert_eq!(config.endpoints.sessions, DEFAULT_SESSIONS_ENDPOINT);
        assert!(config.ignored_urls.is_empty());
        assert!(config.is_type_enabled(BreadcrumbType::Request));
    }

    #[test]
    fn test_enabled_types_policy() {
        let none = NetworkBreadcrumbsConfig::new().enabled_breadcrumb_types(Some(vec![]));
        assert!(!none.is_type_enabled(BreadcrumbType::Request));

        let request_only = NetworkBreadcrumbsConfig::new()
            .enabled_breadcrumb_types(Some(vec![BreadcrumbType::Request]));
        assert!(request_only.is_type_enabled(BreadcrumbType::Request));
        assert!(!request_only.is_type_enabled(BreadcrumbType::Navigation));
    }

    #[test]
    fn test_from_json_with_null_types() {
        let config = NetworkBreadcrumbsConfig::from_json_str(
            r#"{"ignored_urls": ["/ignoreme"], "enabled_breadcrumb_types": null}"#,
        )
        .unwrap();

        assert_eq!(config.ignored_urls, vec!["/ignoreme".to_string()]);
        assert_eq!(config.enabled_breadcrumb_types, None);
        assert_eq!(config.max_breadcrumbs, DEFAULT_MAX_BREADCRUMBS);
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let err = NetworkBreadcrumbsConfig::from_json_str(
            r#"{"enabled_breadcrumb_types": ["requests"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"endpoints": {{"notify": "https://notify.example.com", "sessions": "https://sessions.example.com"}}, "max_breadcrumbs": 50}}"#
        )
        .unwrap();

        let config = NetworkBreadcrumbsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoints.notify, "https://notify.example.com");
        assert_eq!(config.max_breadcrumbs, 50);
    }

    #[test]
    fn test_from_file_missing() {
        let err = NetworkBreadcrumbsConfig::from_file("/nonexistent/netcrumb.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    // Only test touching NETCRUMB_* variables, so no cross-test interference
    #[test]
    fn test_from_env() {
        env::set_var(ENV_IGNORED_URLS, "/ignoreme, /health");
        env::set_var(ENV_ENABLED_TYPES, "");
        env::set_var(ENV_MAX_BREADCRUMBS, "10");

        let config = NetworkBreadcrumbsConfig::from_env().unwrap();
        assert_eq!(config.ignored_urls, vec!["/ignoreme".to_string(), "/health".to_string()]);
        assert_eq!(config.enabled_breadcrumb_types, Some(vec![]));
        assert_eq!(config.max_breadcrumbs, 10);
        assert_eq!(config.endpoints, Endpoints::default());

        env::set_var(ENV_MAX_BREADCRUMBS, "lots");
        let err = NetworkBreadcrumbsConfig::from_env().unwrap_err();
        assert!(err.is_config());

        env::remove_var(ENV_IGNORED_URLS);
        env::remove_var(ENV_ENABLED_TYPES);
        env::remove_var(ENV_MAX_BREADCRUMBS);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" /a, ,/b ,"), vec!["/a".to_string(), "/b".to_string()]);
        assert!(split_list("").is_empty());
    }
}
