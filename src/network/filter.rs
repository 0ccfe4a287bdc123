// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Exemption filter for URLs that must never produce breadcrumbs

use crate::config::{Endpoints, NetworkBreadcrumbsConfig};

/// Decides whether a request URL is exempt from breadcrumbs
#[derive(Debug, Clone)]
pub struct ExemptionFilter {
    endpoints: Endpoints,
    ignored_urls: Vec<String>,
}

impl ExemptionFilter {
    /// Create a filter from reserved endpoints and ignored URLs
    pub fn new(endpoints: Endpoints, ignored_urls: Vec<String>) -> Self {
        Self {
            endpoints,
            ignored_urls,
        }
    }

    /// Create a filter from the observer config
    pub fn from_config(config: &NetworkBreadcrumbsConfig) -> Self {
        Self::new(config.endpoints.clone(), config.ignored_urls.clone())
    }

    /// Check whether `url` must be skipped
    ///
    /// The query string is stripped first; the remainder must equal a
    /// reserved endpoint or an ignored URL exactly.
    pub fn is_exempt(&self, url: &str) -> bool {
        let stripped = strip_query(url);

        stripped == self.endpoints.notify
            || stripped == self.endpoints.sessions
            || self.ignored_urls.iter().any(|ignored| ignored == stripped)
    }
}

/// Everything before the first `?`
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
