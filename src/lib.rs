// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # netcrumb - Network Breadcrumbs
//!
//! Request observer for error-monitoring clients. Every request made through
//! a tracked mechanism leaves a `request` breadcrumb describing its method,
//! URL and outcome, unless the URL is exempt.
//!
//! ## Features
//!
//! - XMLHttpRequest-style tracking: decorates event-driven request objects
//! - fetch()-style tracking: decorates any async fetch mechanism
//! - Argument normalization: URL strings, request objects, null/undefined
//! - Exemptions: ingestion endpoints and ignored URLs, query string stripped
//! - Bounded in-memory breadcrumb log with an enabled-types policy
//! - reqwest-backed HTTP client usable as a fetch host
//!
//! ## Example
//!
//! ```rust,no_run
//! use netcrumb::{HttpClient, NetworkBreadcrumbs, NetworkBreadcrumbsConfig};
//! use netcrumb::network::Fetch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (observer, log) = NetworkBreadcrumbs::with_log(NetworkBreadcrumbsConfig::default());
//!     let fetch = observer.wrap_fetch(HttpClient::new()?);
//!
//!     fetch.fetch("https://example.com/".into(), None).await?;
//!
//!     for crumb in log.breadcrumbs() {
//!         println!("{}: {}", crumb.message, crumb.metadata.request);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod breadcrumb;
pub mod config;
pub mod error;
pub mod http;
pub mod network;

#[cfg(test)]
mod testing;

// Re-exports for convenience

// Breadcrumbs
pub use breadcrumb::{
    Breadcrumb, BreadcrumbLog, BreadcrumbMetadata, BreadcrumbSink, BreadcrumbType, Logger,
    TracingLogger,
};

// Configuration
pub use config::{Endpoints, NetworkBreadcrumbsConfig};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, Response};

// Network
pub use network::{normalize, Descriptor, RequestInput, RequestObject, RequestOptions};
pub use network::{ExemptionFilter, NetworkBreadcrumbs};
pub use network::{FetchTracker, TrackedFetch, TrackedXhr, XhrTracker};

/// netcrumb version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
