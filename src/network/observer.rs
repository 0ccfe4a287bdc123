// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Assembled network breadcrumbs observer

use std::sync::Arc;

use super::emitter::BreadcrumbEmitter;
use super::fetch::{Fetch, FetchTracker, TrackedFetch};
use super::filter::ExemptionFilter;
use super::xhr::{TrackedXhr, XhrTracker, XmlHttpRequest};
use crate::breadcrumb::{BreadcrumbLog, BreadcrumbSink, Logger, TracingLogger};
use crate::config::NetworkBreadcrumbsConfig;

/// Observer leaving breadcrumbs for requests made through both mechanisms
///
/// # Example
///
/// ```rust,no_run
/// use netcrumb::{HttpClient, NetworkBreadcrumbs, NetworkBreadcrumbsConfig};
/// use netcrumb::network::Fetch;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = NetworkBreadcrumbsConfig::new().ignore_url("https://example.com/health");
///     let (observer, log) = NetworkBreadcrumbs::with_log(config);
///
///     let fetch = observer.wrap_fetch(HttpClient::new()?);
///     fetch.fetch("https://example.com/".into(), None).await?;
///
///     println!("{}", log.to_json()?);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct NetworkBreadcrumbs {
    config: NetworkBreadcrumbsConfig,
    filter: Arc<ExemptionFilter>,
    xhr: XhrTracker,
    fetch: FetchTracker,
}

impl NetworkBreadcrumbs {
    /// Create an observer reporting to `sink`, warnings to `logger`
    pub fn new(
        config: NetworkBreadcrumbsConfig,
        sink: Arc<dyn BreadcrumbSink>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let filter = Arc::new(ExemptionFilter::from_config(&config));
        let emitter = BreadcrumbEmitter::new(sink, logger);

        tracing::debug!(
            ignored = config.ignored_urls.len(),
            notify = %config.endpoints.notify,
            sessions = %config.endpoints.sessions,
            "Network breadcrumbs observer created"
        );

        Self {
            xhr: XhrTracker::new(filter.clone(), emitter.clone()),
            fetch: FetchTracker::new(filter.clone(), emitter),
            filter,
            config,
        }
    }

    /// Create an observer recording into a fresh [`BreadcrumbLog`], logging
    /// warnings through `tracing`
    pub fn with_log(config: NetworkBreadcrumbsConfig) -> (Self, BreadcrumbLog) {
        let log = BreadcrumbLog::from_config(&config);
        let observer = Self::new(config, Arc::new(log.clone()), Arc::new(TracingLogger));
        (observer, log)
    }

    pub fn config(&self) -> &NetworkBreadcrumbsConfig {
        &self.config
    }

    pub fn xhr_tracker(&self) -> &XhrTracker {
        &self.xhr
    }

    pub fn fetch_tracker(&self) -> &FetchTracker {
        &self.fetch
    }

    /// Wrap a request object
    pub fn wrap_xhr<R: XmlHttpRequest>(&self, inner: R) -> TrackedXhr<R> {
        self.xhr.wrap(inner)
    }

    /// Wrap a fetch mechanism
    pub fn wrap_fetch<F: Fetch>(&self, inner: F) -> TrackedFetch<F> {
        self.fetch.wrap(inner)
    }

    /// Whether requests to `url` are skipped
    pub fn is_exempt(&self, url: &str) -> bool {
        self.filter.is_exempt(url)
    }
}
